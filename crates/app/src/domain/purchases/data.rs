//! Purchases Data

use crate::{
    domain::{purchases::records::PurchaseUuid, users::UserId, vouchers::records::VoucherUuid},
    tokens::RedemptionToken,
};

/// New Purchase Data
///
/// Every purchase starts out active with no redemption timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub uuid: PurchaseUuid,
    pub voucher_uuid: VoucherUuid,
    pub buyer_id: UserId,
    pub redemption_token: RedemptionToken,
}
