//! Store errors shared by the voucher and purchase stores.

use std::time::Duration;

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

/// Unique keys the stores rely on for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    /// `vouchers.uuid`
    VoucherId,

    /// `purchases.uuid`
    PurchaseId,

    /// `purchases.voucher_uuid`: one purchase per voucher.
    PurchaseVoucher,

    /// `purchases.redemption_token`
    RedemptionToken,
}

impl UniqueKey {
    fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "vouchers_pkey" => Some(Self::VoucherId),
            "purchases_pkey" => Some(Self::PurchaseId),
            "purchases_voucher_uuid_key" => Some(Self::PurchaseVoucher),
            "purchases_redemption_token_key" => Some(Self::RedemptionToken),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {0:?}")]
    Duplicate(UniqueKey),

    #[error("related resource not found")]
    MissingReference,

    #[error("stored data rejected by a constraint")]
    InvalidData,

    #[error("conditional update matched no rows")]
    UpdateNotApplied,

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::UniqueViolation => {
                match database_error.constraint().and_then(UniqueKey::from_constraint) {
                    Some(key) => Self::Duplicate(key),
                    None => Self::Sql(error),
                }
            }
            ErrorKind::ForeignKeyViolation => Self::MissingReference,
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
