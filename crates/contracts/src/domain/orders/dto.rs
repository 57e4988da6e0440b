use crate::enums::OrderStatus;
use serde::{Deserialize, Serialize};

/// Body of `PUT /api/orders/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub assigned_delivery_boy: Option<String>,
}
