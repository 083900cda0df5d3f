//! Voucher Domain Concerns

pub mod lifecycle;
pub mod purchases;
pub mod store;
pub mod users;
pub mod vouchers;
