pub mod aggregate;
pub mod dto;

pub use aggregate::{Payment, PAYMENT_SCHEMA};
pub use dto::RefundPaymentRequest;
