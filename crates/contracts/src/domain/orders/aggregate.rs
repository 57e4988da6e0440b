use crate::enums::{OrderStatus, PaymentStatus, ServiceType};
use crate::shared::list_view::{FieldDef, FieldKind, FieldValue, Record, RecordSchema, ToRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Laundry order as stored by the backend and listed by the admin desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Human-facing number, e.g. `ORD-2024-001`
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub service_type: ServiceType,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    pub item_count: u32,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assigned_delivery_boy: Option<String>,
}

pub static ORDER_SCHEMA: RecordSchema = RecordSchema {
    name: "orders",
    fields: &[
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
            id: "customer_phone",
            label: "Phone",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: false,
        },
        FieldDef {
            id: "service_type",
            label: "Service",
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
            id: "payment_status",
            label: "Payment",
            kind: FieldKind::Status,
            searchable: false,
            filterable: true,
            sortable: true,
        },
        FieldDef {
            id: "total_amount",
            label: "Amount",
            kind: FieldKind::Number,
            searchable: false,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "item_count",
            label: "Items",
            kind: FieldKind::Number,
            searchable: false,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "pickup_date",
            label: "Pickup",
            kind: FieldKind::Timestamp,
            searchable: false,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "assigned_delivery_boy",
            label: "Delivery",
            kind: FieldKind::Text,
            searchable: true,
            filterable: false,
            sortable: true,
        },
        FieldDef {
            id: "created_at",
            label: "Created",
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

impl Order {
    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }
}

impl ToRecord for Order {
    fn schema() -> &'static RecordSchema {
        &ORDER_SCHEMA
    }

    fn to_record(&self) -> Record {
        Record::new(&ORDER_SCHEMA, self.id.clone())
            .with_field("order_number", FieldValue::text(&self.order_number))
            .with_field("customer_name", FieldValue::text(&self.customer_name))
            .with_field("customer_email", FieldValue::text(&self.customer_email))
            .with_opt_field(
                "customer_phone",
                self.customer_phone.as_deref().map(FieldValue::text),
            )
            .with_field("service_type", FieldValue::status(self.service_type.code()))
            .with_field("status", FieldValue::status(self.status.code()))
            .with_field(
                "payment_status",
                FieldValue::status(self.payment_status.code()),
            )
            .with_field("total_amount", FieldValue::Number(self.total_amount))
            .with_field("item_count", FieldValue::Number(f64::from(self.item_count)))
            .with_opt_field(
                "pickup_date",
                self.pickup_date
                    .map(|d| FieldValue::timestamp(d.format("%Y-%m-%d").to_string())),
            )
            .with_opt_field(
                "assigned_delivery_boy",
                self.assigned_delivery_boy.as_deref().map(FieldValue::text),
            )
            .with_field("created_at", FieldValue::timestamp(self.created_at.to_rfc3339()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::list_view::{derive_view, FilterCriteria, PaginationState, SortCriteria};
    use chrono::TimeZone;

    pub(crate) fn order(id: &str, number: &str, customer: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            order_number: number.to_string(),
            customer_name: customer.to_string(),
            customer_email: format!("{}@example.com", customer.to_lowercase().replace(' ', ".")),
            customer_phone: None,
            service_type: ServiceType::WashAndFold,
            status,
            payment_status: PaymentStatus::Paid,
            total_amount: 100.0,
            item_count: 3,
            pickup_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap(),
            assigned_delivery_boy: None,
        }
    }

    #[test]
    fn test_order_record_fields() {
        let mut o = order("1", "ORD-2024-001", "Sarah Johnson", OrderStatus::Ready);
        o.assigned_delivery_boy = Some("Ravi".into());
        let record = o.to_record();

        assert_eq!(record.id(), "1");
        assert_eq!(record.status(), Some("ready"));
        assert_eq!(record.display("service_type").as_deref(), Some("wash_and_fold"));
        assert!(record.field("customer_phone").is_none());
        assert!(record.searchable_text().contains("ord-2024-001"));
        assert!(record.searchable_text().contains("sarah johnson"));
        assert!(record.searchable_text().contains("ravi"));
        assert_eq!(
            record.field("created_at").and_then(FieldValue::as_instant),
            Some(o.created_at)
        );
    }

    #[test]
    fn test_search_by_order_number_fragment() {
        let records: Vec<Record> = vec![
            order("1", "ORD-2024-001", "Sarah Johnson", OrderStatus::Pending),
            order("2", "ORD-2024-002", "Mike Ross", OrderStatus::Delivered),
        ]
        .iter()
        .map(ToRecord::to_record)
        .collect();

        let view = derive_view(
            &ORDER_SCHEMA,
            &records,
            &FilterCriteria::new().with_search("2024-002"),
            Some(&SortCriteria::ascending("order_number")),
            &PaginationState::new(10),
        );
        assert_eq!(view.total_filtered_count, 1);
        assert_eq!(view.visible_records[0].id(), "2");
    }

    #[test]
    fn test_order_json_uses_snake_case_codes() {
        let o = order("1", "ORD-2024-001", "Sarah Johnson", OrderStatus::OutForDelivery);
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["status"], "out_for_delivery");
        assert_eq!(json["payment_status"], "paid");
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, o);
    }
}
