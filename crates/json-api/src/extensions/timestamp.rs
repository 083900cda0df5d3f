//! Optional timestamp parsing for request bodies.

use jiff::Timestamp;

use crate::{extensions::*, responses::ApiError};

pub(crate) trait TimestampExt {
    /// Parse an RFC 3339 timestamp, falling back to now when absent.
    fn into_timestamp_or_now(self, field: &str) -> Result<Timestamp, ApiError>;
}

impl TimestampExt for Option<String> {
    fn into_timestamp_or_now(self, field: &str) -> Result<Timestamp, ApiError> {
        self.map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400(&format!("could not parse \"{field}\""))
            .map(|timestamp| timestamp.unwrap_or_else(Timestamp::now))
    }
}
