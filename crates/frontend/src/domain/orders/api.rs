use contracts::domain::orders::{Order, UpdateOrderStatusRequest};
use contracts::enums::OrderStatus;
use contracts::shared::list_query::ListResponse;

use crate::shared::api_utils::{get_json, put_json};

/// Full order snapshot; filtering and paging happen client-side
pub async fn fetch_orders() -> Result<Vec<Order>, String> {
    let response: ListResponse<Order> = get_json("/api/orders").await?;
    Ok(response.items)
}

/// `assigned_delivery_boy: None` keeps the current assignment
pub async fn update_order_status(
    id: &str,
    status: OrderStatus,
    assigned_delivery_boy: Option<String>,
) -> Result<Order, String> {
    let request = UpdateOrderStatusRequest {
        status,
        assigned_delivery_boy,
    };
    put_json(&format!("/api/orders/{}/status", id), &request).await
}
