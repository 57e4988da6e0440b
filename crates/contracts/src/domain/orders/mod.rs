pub mod aggregate;
pub mod dto;

pub use aggregate::{Order, ORDER_SCHEMA};
pub use dto::UpdateOrderStatusRequest;
