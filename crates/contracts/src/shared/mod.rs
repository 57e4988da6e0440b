pub mod list_query;
pub mod list_view;
