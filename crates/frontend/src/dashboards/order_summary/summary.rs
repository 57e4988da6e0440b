//! Totals over the filtered order list

use contracts::domain::orders::Order;
use contracts::enums::{OrderStatus, ServiceType};

/// Orders and money of one status or service type
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub code: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSummary {
    pub order_count: usize,
    pub item_count: u32,
    pub total_amount: f64,
    /// In status order; statuses without orders are left out
    pub by_status: Vec<Breakdown>,
    pub by_service: Vec<Breakdown>,
}

impl OrderSummary {
    pub fn average_amount(&self) -> f64 {
        if self.order_count == 0 {
            0.0
        } else {
            self.total_amount / self.order_count as f64
        }
    }
}

fn breakdown<K: Copy + PartialEq>(
    orders: &[Order],
    keys: Vec<K>,
    key_of: impl Fn(&Order) -> K,
    names: impl Fn(K) -> (&'static str, &'static str),
) -> Vec<Breakdown> {
    keys.into_iter()
        .filter_map(|key| {
            let matching: Vec<&Order> = orders.iter().filter(|o| key_of(o) == key).collect();
            if matching.is_empty() {
                return None;
            }
            let (code, label) = names(key);
            Some(Breakdown {
                code,
                label,
                count: matching.len(),
                amount: matching.iter().map(|o| o.total_amount).sum(),
            })
        })
        .collect()
}

pub fn summarize(orders: &[Order]) -> OrderSummary {
    OrderSummary {
        order_count: orders.len(),
        item_count: orders.iter().map(|o| o.item_count).sum(),
        total_amount: orders.iter().map(|o| o.total_amount).sum(),
        by_status: breakdown(orders, OrderStatus::all(), |o| o.status, |s| {
            (s.code(), s.display_name())
        }),
        by_service: breakdown(orders, ServiceType::all(), |o| o.service_type, |s| {
            (s.code(), s.display_name())
        }),
    }
}
