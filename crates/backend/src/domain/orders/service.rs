use contracts::domain::orders::{Order, UpdateOrderStatusRequest};
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::config::ListConfig;
use crate::shared::data::listing;
use crate::shared::data::store::{DataSourceError, Store};

pub async fn list(
    store: &Store,
    query: &ListQuery,
    limits: &ListConfig,
) -> Result<ListResponse<Order>, DataSourceError> {
    let orders = store.orders.list().await?;
    Ok(listing::respond(orders, query, limits))
}

pub async fn get_by_id(store: &Store, id: &str) -> Result<Order, DataSourceError> {
    store.orders.get(id).await
}

/// Move an order to a new workflow status.
///
/// Delivered and cancelled orders are closed; any other status is rejected.
pub async fn update_status(
    store: &Store,
    id: &str,
    request: UpdateOrderStatusRequest,
) -> Result<Order, DataSourceError> {
    let UpdateOrderStatusRequest {
        status,
        assigned_delivery_boy,
    } = request;

    let updated = store
        .orders
        .update_with(
            id,
            Box::new(move |order: &mut Order| {
                if !order.status.can_transition_to(status) {
                    return Err(DataSourceError::Rejected(format!(
                        "order {} is {} and cannot become {}",
                        order.order_number,
                        order.status.code(),
                        status.code()
                    )));
                }
                order.status = status;
                if let Some(boy) = assigned_delivery_boy {
                    order.assigned_delivery_boy = Some(boy).filter(|b| !b.trim().is_empty());
                }
                Ok(())
            }),
        )
        .await?;

    tracing::info!(
        "Order {} status set to {}",
        updated.order_number,
        updated.status.code()
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::Seed;
    use contracts::enums::OrderStatus;

    fn store() -> Store {
        Store::in_memory(Seed::embedded().unwrap())
    }

    fn request(status: OrderStatus) -> UpdateOrderStatusRequest {
        UpdateOrderStatusRequest {
            status,
            assigned_delivery_boy: None,
        }
    }

    #[tokio::test]
    async fn test_plain_list_returns_snapshot() {
        let store = store();
        let response = list(&store, &ListQuery::default(), &ListConfig::default())
            .await
            .unwrap();
        assert_eq!(response.total_count, 12);
        assert_eq!(response.items.len(), 12);
        assert_eq!(response.items[0].id, "ord-001");
    }

    #[tokio::test]
    async fn test_list_applies_criteria_and_page() {
        let store = store();
        let query = ListQuery {
            status: Some("delivered".into()),
            sort_by: Some("created_at".into()),
            sort_desc: Some(true),
            page_size: Some(1),
            ..Default::default()
        };
        let response = list(&store, &query, &ListConfig::default()).await.unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.page, 1);
        assert_eq!(response.items[0].id, "ord-009");
    }

    #[tokio::test]
    async fn test_status_update_and_delivery_assignment() {
        let store = store();
        let updated = update_status(
            &store,
            "ord-005",
            UpdateOrderStatusRequest {
                status: OrderStatus::OutForDelivery,
                assigned_delivery_boy: Some("Ravi Kumar".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, OrderStatus::OutForDelivery);
        assert_eq!(updated.assigned_delivery_boy.as_deref(), Some("Ravi Kumar"));
        assert_eq!(
            get_by_id(&store, "ord-005").await.unwrap().status,
            OrderStatus::OutForDelivery
        );
    }

    #[tokio::test]
    async fn test_closed_order_rejects_status_change() {
        let store = store();
        let result = update_status(&store, "ord-007", request(OrderStatus::Pending)).await;
        assert!(matches!(result, Err(DataSourceError::Rejected(_))));
        assert_eq!(
            get_by_id(&store, "ord-007").await.unwrap().status,
            OrderStatus::Delivered
        );
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let store = store();
        assert!(matches!(
            update_status(&store, "ord-999", request(OrderStatus::Ready)).await,
            Err(DataSourceError::NotFound { .. })
        ));
    }
}
