use crate::enums::{PaymentMethod, PaymentStatus};
use crate::shared::list_view::{FieldDef, FieldKind, FieldValue, Record, RecordSchema, ToRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer payment against one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Gateway transaction reference
    pub transaction_id: String,
    pub order_id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub refunded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refund_reason: Option<String>,
}

pub static PAYMENT_SCHEMA: RecordSchema = RecordSchema {
    name: "payments",
    fields: &[
        FieldDef {
            id: "transaction_id",
            label: "Transaction",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "order_number",
            label: "Order #",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "customer_name",
            label: "Customer",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "customer_email",
            label: "Email",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: false,
        },
        FieldDef {
            id: "amount",
            label: "Amount",
            kind: FieldKind::Number,
            searchable: false,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "method",
            label: "Method",
            kind: FieldKind::Status,
            searchable: false,
            filterable: true,
            sortable: true,
        },
        FieldDef {
            id: "status",
            label: "Status",
            kind: FieldKind::Status,
            searchable: false,
            filterable: true,
            sortable: true,
        },
        FieldDef {
            id: "created_at",
            label: "Date",
            kind: FieldKind::Timestamp,
            searchable: false,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "refunded_at",
            label: "Refunded",
            kind: FieldKind::Timestamp,
            searchable: false,
            filterable: false,
            sortable: true,
        },
    ],
    timestamp_field: Some("created_at"),
    status_field: Some("status"),
    default_sort: Some(("created_at", true)),
};

impl Payment {
    pub fn is_refundable(&self) -> bool {
        self.status.is_refundable()
    }
}

impl ToRecord for Payment {
    fn schema() -> &'static RecordSchema {
        &PAYMENT_SCHEMA
    }

    fn to_record(&self) -> Record {
        Record::new(&PAYMENT_SCHEMA, self.id.clone())
            .with_field("transaction_id", FieldValue::text(&self.transaction_id))
            .with_field("order_number", FieldValue::text(&self.order_number))
            .with_field("customer_name", FieldValue::text(&self.customer_name))
            .with_field("customer_email", FieldValue::text(&self.customer_email))
            .with_field("amount", FieldValue::Number(self.amount))
            .with_field("method", FieldValue::status(self.method.code()))
            .with_field("status", FieldValue::status(self.status.code()))
            .with_field("created_at", FieldValue::timestamp(self.created_at.to_rfc3339()))
            .with_opt_field(
                "refunded_at",
                self.refunded_at.map(|t| FieldValue::timestamp(t.to_rfc3339())),
            )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::list_view::{
        derive_view, FilterCriteria, PaginationState, Row, SortCriteria,
    };
    use chrono::TimeZone;

    pub(crate) fn payment(id: &str, amount: f64, status: PaymentStatus, day: u32) -> Payment {
        Payment {
            id: id.to_string(),
            transaction_id: format!("TXN-{id}"),
            order_id: format!("order-{id}"),
            order_number: format!("ORD-2024-{id:0>3}"),
            customer_name: "Sarah Johnson".to_string(),
            customer_email: "sarah@example.com".to_string(),
            amount,
            method: PaymentMethod::Card,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
            refunded_at: None,
            refund_reason: None,
        }
    }

    #[test]
    fn test_paid_filter_sorted_by_amount_desc() {
        let rows = Row::from_items(vec![
            payment("1", 100.0, PaymentStatus::Paid, 1),
            payment("2", 50.0, PaymentStatus::Pending, 2),
            payment("3", 200.0, PaymentStatus::Paid, 3),
        ]);
        let view = derive_view(
            &PAYMENT_SCHEMA,
            &rows,
            &FilterCriteria::new().with_field("status", "paid"),
            Some(&SortCriteria::descending("amount")),
            &PaginationState::new(10),
        );
        let ids: Vec<_> = view.visible_records.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(view.total_filtered_count, 2);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_date_range_on_created_at() {
        let rows = Row::from_items(vec![
            payment("1", 10.0, PaymentStatus::Paid, 1),
            payment("2", 10.0, PaymentStatus::Paid, 3),
            payment("3", 10.0, PaymentStatus::Paid, 5),
        ]);
        let view = derive_view(
            &PAYMENT_SCHEMA,
            &rows,
            &FilterCriteria::new().with_date_range("2024-01-02", "2024-01-04"),
            None,
            &PaginationState::new(10),
        );
        let ids: Vec<_> = view.visible_records.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_unrefunded_payments_sort_last_by_refund_date() {
        let mut refunded = payment("1", 10.0, PaymentStatus::Refunded, 1);
        refunded.refunded_at = Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        let rows = Row::from_items(vec![payment("2", 10.0, PaymentStatus::Paid, 1), refunded]);
        for sort in [SortCriteria::ascending("refunded_at"), SortCriteria::descending("refunded_at")] {
            let view = derive_view(
                &PAYMENT_SCHEMA,
                &rows,
                &FilterCriteria::new(),
                Some(&sort),
                &PaginationState::new(10),
            );
            assert_eq!(view.visible_records[1].item.id, "2");
        }
    }
}
