//! Voucher lifecycle errors.

use thiserror::Error;

use crate::domain::store::StoreError;

/// Coarse error category, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

#[derive(Debug, Error)]
pub enum VouchersServiceError {
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("voucher not found")]
    VoucherNotFound,

    #[error("purchase not found")]
    PurchaseNotFound,

    #[error("voucher already purchased")]
    AlreadyPurchased,

    #[error("voucher already redeemed")]
    AlreadyRedeemed,

    #[error("storage error")]
    Storage(#[from] StoreError),
}

impl VouchersServiceError {
    pub(crate) const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid { .. } => ErrorKind::Validation,
            Self::VoucherNotFound | Self::PurchaseNotFound => ErrorKind::NotFound,
            Self::AlreadyPurchased | Self::AlreadyRedeemed => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Storage timeouts are reported separately so callers can answer with
    /// "try again later" instead of a hard failure.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Storage(StoreError::Timeout(_)))
    }
}
