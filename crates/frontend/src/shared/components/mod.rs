pub mod date_range_filter;
pub mod error_panel;
pub mod filter_select;
pub mod pagination_controls;
pub mod record_table;
