pub mod orders;
pub mod payments;

#[cfg(test)]
pub(crate) fn init_test_store() {
    use crate::shared::data::{seed::Seed, store};
    if store::get_store().is_err() {
        let _ = store::initialize(Seed::embedded().unwrap());
    }
}
