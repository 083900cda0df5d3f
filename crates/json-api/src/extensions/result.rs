//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::{error, info};

use crate::responses::ApiError;

/// Map any error to a logged HTTP error.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    fn or_400(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::internal()
        })
    }

    fn or_400(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            info!("{message}: {error}");

            ApiError::bad_request(message)
        })
    }
}
