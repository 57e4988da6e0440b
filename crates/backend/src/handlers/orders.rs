use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::orders::{Order, UpdateOrderStatusRequest};
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::domain::orders::service;
use crate::shared::config;
use crate::shared::data::store::get_store;
use crate::shared::error::ApiError;

/// GET /api/orders
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<ListResponse<Order>>, ApiError> {
    let store = get_store()?;
    let response = service::list(store, &query, &config::current().list).await?;
    Ok(Json(response))
}

/// GET /api/orders/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Order>, ApiError> {
    Ok(Json(service::get_by_id(get_store()?, &id).await?))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    Path(id): Path<String>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = service::update_status(get_store()?, &id, request)
        .await
        .inspect_err(|e| tracing::warn!("Status change for order {} failed: {}", id, e))?;
    Ok(Json(order))
}
