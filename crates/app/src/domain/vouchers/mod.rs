//! Vouchers

pub mod data;
pub mod records;
mod repository;
pub mod store;

pub use repository::PgVoucherStore;
pub use store::*;
