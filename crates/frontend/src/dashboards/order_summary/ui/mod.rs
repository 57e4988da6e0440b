pub mod dashboard;

pub use dashboard::OrderSummaryDashboard;
