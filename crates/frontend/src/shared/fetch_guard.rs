use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Request sequence numbers for one list view.
///
/// Every fetch takes a ticket; a completion is applied only if its ticket is
/// still the latest, so a slow response can never overwrite a newer one.
#[derive(Clone, Debug, Default)]
pub struct FetchGuard {
    latest: Arc<AtomicU64>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request and get its ticket
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let guard = FetchGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.clone().begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
