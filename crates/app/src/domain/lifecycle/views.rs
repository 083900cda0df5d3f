//! Read models returned by the lifecycle manager.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        purchases::records::{PurchaseStatus, PurchaseUuid, UserVoucherRecord},
        vouchers::records::VoucherUuid,
    },
    tokens::RedemptionToken,
};

/// A buyer's purchased voucher.
///
/// `redemption_token` is `Some` exactly when `status` is active.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseView {
    pub purchase_uuid: PurchaseUuid,
    pub voucher_uuid: VoucherUuid,
    pub title: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price: Decimal,
    pub status: PurchaseStatus,
    pub purchased_at: Timestamp,
    pub redeemed_at: Option<Timestamp>,
    pub redemption_token: Option<RedemptionToken>,
}

impl From<UserVoucherRecord> for PurchaseView {
    fn from(record: UserVoucherRecord) -> Self {
        let redemption_token = match record.status {
            PurchaseStatus::Active => record.redemption_token,
            PurchaseStatus::Redeemed => None,
        };

        Self {
            purchase_uuid: record.purchase_uuid,
            voucher_uuid: record.voucher_uuid,
            title: record.title,
            description: record.description,
            photo_url: record.photo_url,
            price: record.price,
            status: record.status,
            purchased_at: record.purchased_at,
            redeemed_at: record.redeemed_at,
            redemption_token,
        }
    }
}
