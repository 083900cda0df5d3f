//! Vouchers Data

use rust_decimal::Decimal;

use crate::domain::{
    users::{ListingId, UserId},
    vouchers::records::VoucherUuid,
};

/// Caller input for a new voucher, before validation and id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherDraft {
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub photo_url: Option<String>,
}

impl VoucherDraft {
    /// Attach a generated id.
    #[must_use]
    pub fn into_new_voucher(self, uuid: VoucherUuid) -> NewVoucher {
        NewVoucher {
            uuid,
            listing_id: self.listing_id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            price: self.price,
            photo_url: self.photo_url,
        }
    }
}

/// New Voucher Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVoucher {
    pub uuid: VoucherUuid,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub photo_url: Option<String>,
}
