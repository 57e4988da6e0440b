use contracts::domain::orders::Order;
use contracts::enums::{OrderStatus, PaymentStatus, ServiceType};

use crate::shared::list_utils::{non_blank, options_with_all};

/// Table columns, in display order
pub const COLUMNS: &[&str] = &[
    "order_number",
    "customer_name",
    "service_type",
    "status",
    "payment_status",
    "item_count",
    "total_amount",
    "assigned_delivery_boy",
    "created_at",
];

/// Options of a filterable order field; unknown fields only offer "All"
pub fn filter_options(field: &str) -> Vec<(String, String)> {
    match field {
        "status" => {
            options_with_all(OrderStatus::all().into_iter().map(|s| (s.code(), s.display_name())))
        }
        "payment_status" => {
            options_with_all(PaymentStatus::all().into_iter().map(|s| (s.code(), s.display_name())))
        }
        "service_type" => {
            options_with_all(ServiceType::all().into_iter().map(|s| (s.code(), s.display_name())))
        }
        _ => options_with_all(std::iter::empty()),
    }
}

/// Statuses an admin may move the order to; none once it is closed
pub fn next_statuses(order: &Order) -> Vec<OrderStatus> {
    if order.is_final() {
        return Vec::new();
    }
    OrderStatus::all()
        .into_iter()
        .filter(|s| *s != order.status)
        .collect()
}

/// Handing an order to a driver asks who takes it
pub fn asks_for_delivery_person(status: OrderStatus) -> bool {
    status == OrderStatus::OutForDelivery
}

/// Assignment sent with a status change: only when dispatching, and only a
/// non-blank name
pub fn delivery_assignment(status: OrderStatus, entered: Option<String>) -> Option<String> {
    if asks_for_delivery_person(status) {
        non_blank(entered)
    } else {
        None
    }
}
