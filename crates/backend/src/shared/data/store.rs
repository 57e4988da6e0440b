use async_trait::async_trait;
use contracts::domain::orders::Order;
use contracts::domain::payments::Payment;
use once_cell::sync::OnceCell;
use thiserror::Error;
use tokio::sync::RwLock;

use super::seed::Seed;

static STORE: OnceCell<Store> = OnceCell::new();

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A patch refused to apply (invalid transition, not refundable, ...)
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("Store has not been initialized")]
    Uninitialized,
}

/// Items the store can address by id
pub trait Identified {
    const KIND: &'static str;
    fn id(&self) -> &str;
}

impl Identified for Order {
    const KIND: &'static str = "order";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Payment {
    const KIND: &'static str = "payment";
    fn id(&self) -> &str {
        &self.id
    }
}

/// In-place change applied to one stored item; returning `Err` leaves the item untouched
pub type Patch<T> = Box<dyn FnOnce(&mut T) -> Result<(), DataSourceError> + Send>;

/// Source of list snapshots and single-record updates
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Full snapshot in storage order
    async fn list(&self) -> Result<Vec<T>, DataSourceError>;

    async fn get(&self, id: &str) -> Result<T, DataSourceError>;

    /// Apply `patch` to the item with `id` atomically and return the updated item
    async fn update_with(&self, id: &str, patch: Patch<T>) -> Result<T, DataSourceError>;
}

/// Vec-backed source behind a tokio `RwLock`; readers clone a snapshot
pub struct MemoryDataSource<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryDataSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl<T> DataSource<T> for MemoryDataSource<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, DataSourceError> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<T, DataSourceError> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn update_with(&self, id: &str, patch: Patch<T>) -> Result<T, DataSourceError> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        let mut updated = slot.clone();
        patch(&mut updated)?;
        *slot = updated.clone();
        Ok(updated)
    }
}

fn not_found<T: Identified>(id: &str) -> DataSourceError {
    DataSourceError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

/// All record collections of the desk
pub struct Store {
    pub orders: Box<dyn DataSource<Order>>,
    pub payments: Box<dyn DataSource<Payment>>,
}

impl Store {
    pub fn in_memory(seed: Seed) -> Self {
        Self {
            orders: Box::new(MemoryDataSource::new(seed.orders)),
            payments: Box::new(MemoryDataSource::new(seed.payments)),
        }
    }
}

pub fn initialize(seed: Seed) -> anyhow::Result<()> {
    let (orders, payments) = (seed.orders.len(), seed.payments.len());
    STORE
        .set(Store::in_memory(seed))
        .map_err(|_| anyhow::anyhow!("store already initialized"))?;
    tracing::info!("Store ready: {} orders, {} payments", orders, payments);
    Ok(())
}

pub fn get_store() -> Result<&'static Store, DataSourceError> {
    STORE.get().ok_or(DataSourceError::Uninitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Identified for Item {
        const KIND: &'static str = "item";
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn source() -> MemoryDataSource<Item> {
        MemoryDataSource::new(
            (1..=3)
                .map(|i| Item {
                    id: i.to_string(),
                    value: i,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let source = source();
        assert_eq!(source.list().await.unwrap().len(), 3);
        assert_eq!(source.get("2").await.unwrap().value, 2);
        assert!(matches!(
            source.get("9").await,
            Err(DataSourceError::NotFound { kind: "item", .. })
        ));
    }

    #[tokio::test]
    async fn test_update_with_applies_patch() {
        let source = source();
        let updated = source
            .update_with("3", Box::new(|item: &mut Item| {
                item.value = 30;
                Ok(())
            }))
            .await
            .unwrap();
        assert_eq!(updated.value, 30);
        assert_eq!(source.get("3").await.unwrap().value, 30);
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_item_untouched() {
        let source = source();
        let result = source
            .update_with("1", Box::new(|item: &mut Item| {
                item.value = 99;
                Err(DataSourceError::Rejected("no".into()))
            }))
            .await;
        assert!(matches!(result, Err(DataSourceError::Rejected(_))));
        assert_eq!(source.get("1").await.unwrap().value, 1);
    }
}
