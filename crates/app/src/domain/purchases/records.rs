//! Purchase Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{users::UserId, vouchers::records::VoucherUuid},
    tokens::RedemptionToken,
    uuids::TypedUuid,
};

/// Purchase UUID
pub type PurchaseUuid = TypedUuid<PurchaseRecord>;

/// Purchase lifecycle status. `Redeemed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseStatus {
    Active,
    Redeemed,
}

impl PurchaseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Redeemed => "redeemed",
        }
    }
}

impl Display for PurchaseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown purchase status: {0}")]
pub struct UnknownPurchaseStatus(String);

impl FromStr for PurchaseStatus {
    type Err = UnknownPurchaseStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "redeemed" => Ok(Self::Redeemed),
            other => Err(UnknownPurchaseStatus(other.to_string())),
        }
    }
}

/// Purchase Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub uuid: PurchaseUuid,
    pub voucher_uuid: VoucherUuid,
    pub buyer_id: UserId,
    pub redemption_token: RedemptionToken,
    pub status: PurchaseStatus,
    pub redeemed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl PurchaseRecord {
    #[must_use]
    pub fn is_redeemed(&self) -> bool {
        self.status == PurchaseStatus::Redeemed
    }
}

/// A buyer's purchase joined with the voucher it bought.
#[derive(Debug, Clone, PartialEq)]
pub struct UserVoucherRecord {
    pub purchase_uuid: PurchaseUuid,
    pub voucher_uuid: VoucherUuid,
    pub title: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price: Decimal,
    pub status: PurchaseStatus,
    pub purchased_at: Timestamp,
    pub redeemed_at: Option<Timestamp>,

    /// Present only while the purchase is active.
    pub redemption_token: Option<RedemptionToken>,
}
