//! Voucher store capability.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    store::StoreError,
    users::UserId,
    vouchers::{
        data::NewVoucher,
        records::{VoucherRecord, VoucherUuid},
    },
};

#[automock]
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Persist a new voucher.
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<VoucherRecord, StoreError>;

    /// Fetch a voucher by id.
    async fn get_voucher(&self, voucher: VoucherUuid)
    -> Result<Option<VoucherRecord>, StoreError>;

    /// Vouchers created by the given listing owner, newest first.
    async fn list_vouchers_by_owner(&self, user: UserId)
    -> Result<Vec<VoucherRecord>, StoreError>;
}
