//! Voucher domain, persistence and lifecycle management.

pub mod context;
pub mod database;
pub mod domain;
pub mod tokens;
pub mod uuids;
