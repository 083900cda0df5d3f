//! Identifier and redemption token generation.
//!
//! Redemption tokens are bearer secrets: whoever presents one can redeem the
//! purchase it belongs to. They are drawn from the operating system CSPRNG and
//! never derived from the voucher, buyer, or clock.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use mockall::automock;
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Redemption token prefix.
pub const REDEMPTION_TOKEN_PREFIX: &str = "vr_";

/// Number of random bytes behind every redemption token.
pub const REDEMPTION_TOKEN_SECRET_BYTES: usize = 32;

/// Number of random bytes behind every generated identifier.
pub const IDENTIFIER_BYTES: usize = 16;

/// Opaque redemption secret issued at purchase time.
#[derive(Clone, PartialEq, Eq)]
pub struct RedemptionToken(String);

impl RedemptionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for RedemptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RedemptionToken(**redacted**)")
    }
}

impl Drop for RedemptionToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl From<String> for RedemptionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Error)]
#[error("redemption token is empty")]
pub struct EmptyRedemptionToken;

impl FromStr for RedemptionToken {
    type Err = EmptyRedemptionToken;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(EmptyRedemptionToken);
        }

        Ok(Self(value.to_owned()))
    }
}

/// Source of identifiers and redemption tokens.
#[automock]
pub trait TokenGenerator: Send + Sync {
    /// A fresh 128-bit random identifier.
    fn identifier(&self) -> Uuid;

    /// A fresh redemption token.
    fn redemption_token(&self) -> RedemptionToken;
}

/// [`TokenGenerator`] backed by the operating system random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngTokenGenerator;

impl OsRngTokenGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for OsRngTokenGenerator {
    fn identifier(&self) -> Uuid {
        let mut bytes = [0_u8; IDENTIFIER_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Uuid::from_bytes(bytes)
    }

    fn redemption_token(&self) -> RedemptionToken {
        let mut secret = [0_u8; REDEMPTION_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut secret);

        let token = format!(
            "{REDEMPTION_TOKEN_PREFIX}{}",
            URL_SAFE_NO_PAD.encode(secret)
        );

        secret.zeroize();

        RedemptionToken(token)
    }
}
