//! Voucher Lifecycle

pub mod errors;
pub mod service;
pub mod views;


pub use errors::{ErrorKind, VouchersServiceError};
pub use service::*;
