use contracts::domain::orders::Order;
use contracts::domain::payments::Payment;
use serde::Deserialize;
use std::path::Path;

use super::store::DataSourceError;

const EMBEDDED_SEED: &str = include_str!("seed.json");

/// Initial content of the store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Seed {
    pub fn parse(json: &str) -> Result<Self, DataSourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn embedded() -> Result<Self, DataSourceError> {
        Self::parse(EMBEDDED_SEED)
    }
}

/// Read the seed file, or the embedded seed when no path is configured
pub fn load(path: Option<&Path>) -> anyhow::Result<Seed> {
    match path {
        Some(path) => {
            tracing::info!("Loading seed data from: {}", path.display());
            let contents = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read seed {}: {e}", path.display()))?;
            Ok(Seed::parse(&contents)?)
        }
        None => {
            tracing::info!("Using embedded seed data");
            Ok(Seed::embedded()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::PaymentStatus;

    #[test]
    fn test_embedded_seed_parses() {
        let seed = Seed::embedded().unwrap();
        assert!(!seed.orders.is_empty());
        assert!(!seed.payments.is_empty());
        for payment in &seed.payments {
            assert!(
                seed.orders.iter().any(|o| o.id == payment.order_id),
                "payment {} points at a missing order",
                payment.id
            );
        }
        assert!(seed.payments.iter().any(|p| p.status == PaymentStatus::Paid));
    }

    #[test]
    fn test_malformed_seed_is_an_error() {
        assert!(matches!(
            Seed::parse("{\"orders\": 5}"),
            Err(DataSourceError::Seed(_))
        ));
        assert!(Seed::parse("{}").unwrap().orders.is_empty());
    }

    #[test]
    fn test_missing_seed_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/seed.json"))).is_err());
    }
}
