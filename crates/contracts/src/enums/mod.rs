pub mod order_status;
pub mod payment_method;
pub mod payment_status;
pub mod service_type;

pub use order_status::OrderStatus;
pub use payment_method::PaymentMethod;
pub use payment_status::PaymentStatus;
pub use service_type::ServiceType;
