//! Voucher response models and envelopes.

use std::string::ToString;

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vouchers_app::domain::{
    lifecycle::views::PurchaseView, purchases::records::PurchaseRecord,
    vouchers::records::VoucherRecord,
};

use crate::{extensions::*, responses::ApiError};

/// Prices travel as JSON numbers and are stored as exact decimals.
pub(crate) fn price_from_f64(value: f64) -> Result<Decimal, ApiError> {
    if !value.is_finite() {
        return Err(ApiError::bad_request("Invalid price"));
    }

    value.to_string().parse::<Decimal>().or_400("Invalid price")
}

pub(crate) fn price_to_f64(price: Decimal) -> Result<f64, ApiError> {
    price
        .to_f64()
        .ok_or("price does not fit in an f64")
        .or_500("failed to encode price")
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherResponse {
    /// Voucher id
    pub id: Uuid,

    /// Marketplace listing the voucher belongs to
    pub adv_id: i64,

    /// Listing owner
    pub user_id: i64,

    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub photo_url: Option<String>,

    /// The date and time the voucher was created
    pub created_at: String,
}

impl TryFrom<VoucherRecord> for VoucherResponse {
    type Error = ApiError;

    fn try_from(voucher: VoucherRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: voucher.uuid.into(),
            adv_id: voucher.listing_id.get(),
            user_id: voucher.user_id.get(),
            price: price_to_f64(voucher.price)?,
            title: voucher.title,
            description: voucher.description,
            photo_url: voucher.photo_url,
            created_at: voucher.created_at.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    /// Purchase id
    pub id: Uuid,

    pub voucher_id: Uuid,
    pub buyer_id: i64,

    /// Secret the buyer presents to redeem the voucher
    pub redemption_token: String,

    /// `active` or `redeemed`
    pub status: String,

    pub redeemed_at: Option<String>,
    pub created_at: String,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(purchase: PurchaseRecord) -> Self {
        Self {
            id: purchase.uuid.into(),
            voucher_id: purchase.voucher_uuid.into(),
            buyer_id: purchase.buyer_id.get(),
            redemption_token: purchase.redemption_token.as_str().to_owned(),
            status: purchase.status.to_string(),
            redeemed_at: purchase.redeemed_at.as_ref().map(ToString::to_string),
            created_at: purchase.created_at.to_string(),
        }
    }
}

/// A purchased voucher as its buyer sees it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserVoucherResponse {
    pub purchase_id: Uuid,
    pub voucher_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price: f64,
    pub status: String,
    pub purchased_at: String,
    pub redeemed_at: Option<String>,

    /// Only present while the purchase is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redemption_token: Option<String>,
}

impl TryFrom<PurchaseView> for UserVoucherResponse {
    type Error = ApiError;

    fn try_from(view: PurchaseView) -> Result<Self, Self::Error> {
        Ok(Self {
            purchase_id: view.purchase_uuid.into(),
            voucher_id: view.voucher_uuid.into(),
            price: price_to_f64(view.price)?,
            status: view.status.to_string(),
            purchased_at: view.purchased_at.to_string(),
            redeemed_at: view.redeemed_at.as_ref().map(ToString::to_string),
            redemption_token: view
                .redemption_token
                .as_ref()
                .map(|token| token.as_str().to_owned()),
            title: view.title,
            description: view.description,
            photo_url: view.photo_url,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherEnvelope {
    pub message: String,
    pub data: VoucherResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseEnvelope {
    pub message: String,
    pub data: PurchaseResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageEnvelope {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserVouchersEnvelope {
    pub message: String,
    pub data: Vec<UserVoucherResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnedVouchersEnvelope {
    pub message: String,
    pub data: Vec<VoucherResponse>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn prices_keep_their_written_digits() -> TestResult {
        assert_eq!(price_from_f64(5.0)?, Decimal::new(5, 0));
        assert_eq!(price_from_f64(12.345)?, Decimal::new(12_345, 3));
        assert_eq!(price_from_f64(0.1)?, Decimal::new(1, 1));

        Ok(())
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        assert!(price_from_f64(f64::NAN).is_err());
        assert!(price_from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn out_of_range_prices_are_rejected() {
        assert_eq!(
            price_from_f64(1e300).err(),
            Some(ApiError::bad_request("Invalid price"))
        );
    }

    #[test]
    fn decimals_encode_as_numbers() -> TestResult {
        assert!((price_to_f64(Decimal::new(1999, 2))? - 19.99).abs() < f64::EPSILON);

        Ok(())
    }
}
