//! Voucher Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::users::{ListingId, UserId},
    uuids::TypedUuid,
};

/// Voucher UUID
pub type VoucherUuid = TypedUuid<VoucherRecord>;

/// Voucher Record
///
/// Vouchers are immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherRecord {
    pub uuid: VoucherUuid,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}
