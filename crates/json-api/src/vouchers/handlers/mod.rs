//! Voucher Handlers

pub(crate) mod create;
pub(crate) mod owned;
pub(crate) mod purchase;
pub(crate) mod redeem;
pub(crate) mod user_vouchers;


#[cfg(test)]
pub(crate) use tests::*;
