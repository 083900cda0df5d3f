//! Purchase store capability.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        purchases::{
            data::NewPurchase,
            records::{PurchaseRecord, UserVoucherRecord},
        },
        store::StoreError,
        users::UserId,
        vouchers::records::VoucherUuid,
    },
    tokens::RedemptionToken,
};

#[automock]
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Persist a new, active purchase.
    ///
    /// A second purchase of the same voucher fails with
    /// [`StoreError::Duplicate`] for [`crate::domain::store::UniqueKey::PurchaseVoucher`].
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<PurchaseRecord, StoreError>;

    async fn get_purchase_by_voucher(
        &self,
        voucher: VoucherUuid,
    ) -> Result<Option<PurchaseRecord>, StoreError>;

    async fn get_purchase_by_token(
        &self,
        token: &RedemptionToken,
    ) -> Result<Option<PurchaseRecord>, StoreError>;

    /// Purchases made by the given buyer, newest first.
    async fn list_purchases_by_buyer(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseRecord>, StoreError>;

    /// Purchases joined with their vouchers, newest first. The redemption
    /// token is only projected for active purchases.
    async fn list_user_vouchers(&self, buyer: UserId)
    -> Result<Vec<UserVoucherRecord>, StoreError>;

    /// Move the purchase holding `token` from active to redeemed.
    ///
    /// Returns `false` when no active purchase matched, without telling apart
    /// an unknown token from one that is already redeemed.
    async fn mark_redeemed(
        &self,
        token: &RedemptionToken,
        redeemed_at: Timestamp,
    ) -> Result<bool, StoreError>;
}
