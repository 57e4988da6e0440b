use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::payments::{Payment, RefundPaymentRequest};
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::domain::payments::service;
use crate::shared::config;
use crate::shared::data::store::get_store;
use crate::shared::error::ApiError;

/// GET /api/payments
pub async fn list(
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Payment>>, ApiError> {
    let store = get_store()?;
    let response = service::list(store, &query, &config::current().list).await?;
    Ok(Json(response))
}

/// GET /api/payments/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Payment>, ApiError> {
    Ok(Json(service::get_by_id(get_store()?, &id).await?))
}

/// POST /api/payments/:id/refund
pub async fn refund(
    Path(id): Path<String>,
    request: Option<Json<RefundPaymentRequest>>,
) -> Result<Json<Payment>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let payment = service::refund(get_store()?, &id, request)
        .await
        .inspect_err(|e| tracing::warn!("Refund of payment {} failed: {}", id, e))?;
    Ok(Json(payment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_paged_list() {
        super::super::init_test_store();
        let query = ListQuery {
            page: Some(2),
            page_size: Some(4),
            ..Default::default()
        };
        let Json(response) = list(Query(query)).await.unwrap();
        assert_eq!(response.total_count, 10);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.page, 2);
        assert_eq!(response.items.len(), 4);
    }

    #[tokio::test]
    async fn test_refunding_failed_payment_is_400() {
        super::super::init_test_store();
        let err = refund(Path("pay-010".into()), None).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
