use contracts::domain::payments::{Payment, RefundPaymentRequest};
use contracts::shared::list_query::ListResponse;

use crate::shared::api_utils::{get_json, post_json};

/// Full payment snapshot; filtering and paging happen client-side
pub async fn fetch_payments() -> Result<Vec<Payment>, String> {
    let response: ListResponse<Payment> = get_json("/api/payments").await?;
    Ok(response.items)
}

pub async fn refund_payment(id: &str, reason: Option<String>) -> Result<Payment, String> {
    let request = RefundPaymentRequest { reason };
    post_json(&format!("/api/payments/{}/refund", id), &request).await
}
