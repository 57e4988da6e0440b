use contracts::enums::{PaymentMethod, PaymentStatus};

use crate::shared::list_utils::options_with_all;

/// Table columns, in display order
pub const COLUMNS: &[&str] = &[
    "transaction_id",
    "order_number",
    "customer_name",
    "method",
    "status",
    "amount",
    "created_at",
    "refunded_at",
];

/// Options of a filterable payment field; unknown fields only offer "All"
pub fn filter_options(field: &str) -> Vec<(String, String)> {
    match field {
        "status" => {
            options_with_all(PaymentStatus::all().into_iter().map(|s| (s.code(), s.display_name())))
        }
        "method" => {
            options_with_all(PaymentMethod::all().into_iter().map(|m| (m.code(), m.display_name())))
        }
        _ => options_with_all(std::iter::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::payments::PAYMENT_SCHEMA;
    use contracts::shared::list_view::ALL;

    #[test]
    fn test_columns_exist_in_schema() {
        for column in COLUMNS {
            assert!(PAYMENT_SCHEMA.has_field(column), "unknown column {column}");
        }
    }

    #[test]
    fn test_every_filterable_field_has_options() {
        for field in PAYMENT_SCHEMA.filterable_fields() {
            let options = filter_options(field.id);
            assert_eq!(options[0].0, ALL);
            assert!(options.len() > 1, "no options for {}", field.id);
        }
    }

    #[test]
    fn test_method_options() {
        let options = filter_options("method");
        assert!(options.iter().any(|(code, label)| code == "upi" && label == "UPI"));
        assert_eq!(filter_options("customer_name").len(), 1);
    }
}
