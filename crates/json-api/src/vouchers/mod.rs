//! Voucher webhooks and listings

mod errors;
mod models;

pub(crate) mod handlers;

pub(crate) use handlers::*;
