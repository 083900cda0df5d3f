//! Voucher Errors

use tracing::{error, warn};

use vouchers_app::domain::lifecycle::{ErrorKind, VouchersServiceError};

use crate::{observability::observe_lifecycle, responses::ApiError};

pub(crate) fn into_api_error(error: VouchersServiceError) -> ApiError {
    match error.kind() {
        ErrorKind::Validation => ApiError::bad_request(capitalise(&error.to_string())),
        ErrorKind::NotFound => ApiError::not_found(capitalise(&error.to_string())),
        ErrorKind::Conflict => ApiError::conflict(capitalise(&error.to_string())),
        ErrorKind::Storage if error.is_timeout() => {
            warn!("voucher storage timed out: {error:?}");

            ApiError::service_unavailable("Voucher storage is temporarily unavailable")
        }
        ErrorKind::Storage => {
            error!("voucher storage failed: {error:?}");

            ApiError::internal()
        }
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Map a lifecycle result to an HTTP result, counting its outcome.
pub(crate) trait LifecycleResultExt<T> {
    fn observed(self, operation: &str) -> Result<T, ApiError>;
}

impl<T> LifecycleResultExt<T> for Result<T, VouchersServiceError> {
    fn observed(self, operation: &str) -> Result<T, ApiError> {
        match self {
            Ok(value) => {
                observe_lifecycle(operation, "success");

                Ok(value)
            }
            Err(source) => {
                let error = into_api_error(source);

                observe_lifecycle(operation, error.error());

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salvo::http::StatusCode;
    use vouchers_app::domain::store::StoreError;

    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        let cases = [
            (VouchersServiceError::VoucherNotFound, StatusCode::NOT_FOUND),
            (VouchersServiceError::PurchaseNotFound, StatusCode::NOT_FOUND),
            (VouchersServiceError::AlreadyPurchased, StatusCode::CONFLICT),
            (VouchersServiceError::AlreadyRedeemed, StatusCode::CONFLICT),
            (
                VouchersServiceError::Storage(StoreError::UpdateNotApplied),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                VouchersServiceError::Storage(StoreError::Timeout(Duration::from_secs(5))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(into_api_error(error).status(), status);
        }
    }

    #[test]
    fn conflict_messages_are_readable() {
        assert_eq!(
            into_api_error(VouchersServiceError::AlreadyRedeemed),
            ApiError::conflict("Voucher already redeemed")
        );
    }

    #[test]
    fn observed_passes_values_through() {
        let ok: Result<u8, VouchersServiceError> = Ok(7);
        let err: Result<u8, VouchersServiceError> = Err(VouchersServiceError::VoucherNotFound);

        assert_eq!(ok.observed("purchase").ok(), Some(7));
        assert_eq!(
            err.observed("purchase").err().map(|error| error.status()),
            Some(StatusCode::NOT_FOUND)
        );
    }

    #[test]
    fn capitalise_handles_empty_input() {
        assert_eq!(capitalise(""), "");
        assert_eq!(capitalise("voucher not found"), "Voucher not found");
    }
}
