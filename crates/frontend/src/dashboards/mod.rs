pub mod order_summary;

pub use order_summary::ui::OrderSummaryDashboard;
