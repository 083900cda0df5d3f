//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        lifecycle::{VouchersService, VouchersServiceError},
        purchases::records::PurchaseRecord,
        users::{ListingId, UserId},
        vouchers::{
            data::VoucherDraft,
            records::{VoucherRecord, VoucherUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn voucher_draft(user: i64, title: &str, price: Decimal) -> VoucherDraft {
    VoucherDraft {
        listing_id: ListingId::new(10),
        user_id: UserId::new(user),
        title: title.to_string(),
        description: None,
        price,
        photo_url: None,
    }
}

pub(crate) async fn create_voucher(
    ctx: &TestContext,
    user: i64,
    title: &str,
) -> Result<VoucherRecord, VouchersServiceError> {
    ctx.vouchers
        .create_voucher(voucher_draft(user, title, Decimal::new(500, 2)))
        .await
}

pub(crate) async fn purchase_voucher(
    ctx: &TestContext,
    voucher: VoucherUuid,
    buyer: i64,
) -> Result<PurchaseRecord, VouchersServiceError> {
    ctx.vouchers
        .purchase_voucher(voucher, UserId::new(buyer))
        .await
}
