pub mod listing;
pub mod seed;
pub mod store;
