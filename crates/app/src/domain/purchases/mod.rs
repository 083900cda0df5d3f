//! Purchases

pub mod data;
pub mod records;
mod repository;
pub mod store;

pub use repository::PgPurchaseStore;
pub use store::*;
