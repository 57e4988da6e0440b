use chrono::Utc;
use contracts::domain::orders::Order;
use contracts::domain::payments::{Payment, RefundPaymentRequest};
use contracts::enums::PaymentStatus;
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::config::ListConfig;
use crate::shared::data::listing;
use crate::shared::data::store::{DataSourceError, Store};

pub async fn list(
    store: &Store,
    query: &ListQuery,
    limits: &ListConfig,
) -> Result<ListResponse<Payment>, DataSourceError> {
    let payments = store.payments.list().await?;
    Ok(listing::respond(payments, query, limits))
}

pub async fn get_by_id(store: &Store, id: &str) -> Result<Payment, DataSourceError> {
    store.payments.get(id).await
}

/// Refund a paid payment and mark its order's payment as refunded
pub async fn refund(
    store: &Store,
    id: &str,
    request: RefundPaymentRequest,
) -> Result<Payment, DataSourceError> {
    let reason = request.reason.filter(|r| !r.trim().is_empty());
    let refunded = store
        .payments
        .update_with(
            id,
            Box::new(move |payment: &mut Payment| {
                if !payment.is_refundable() {
                    return Err(DataSourceError::Rejected(format!(
                        "payment {} is {}, only paid payments can be refunded",
                        payment.transaction_id,
                        payment.status.code()
                    )));
                }
                payment.status = PaymentStatus::Refunded;
                payment.refunded_at = Some(Utc::now());
                payment.refund_reason = reason;
                Ok(())
            }),
        )
        .await?;

    tracing::info!(
        "Payment {} refunded ({:.2})",
        refunded.transaction_id,
        refunded.amount
    );

    let order_update = store
        .orders
        .update_with(
            &refunded.order_id,
            Box::new(|order: &mut Order| {
                order.payment_status = PaymentStatus::Refunded;
                Ok(())
            }),
        )
        .await;
    if let Err(e) = order_update {
        tracing::warn!(
            "Payment {} refunded but its order was not updated: {}",
            refunded.transaction_id,
            e
        );
    }

    Ok(refunded)
}
