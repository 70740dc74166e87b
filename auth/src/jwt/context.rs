use std::fmt;

use chrono::Duration;

use super::errors::SigningContextError;

/// Process-wide signing configuration.
///
/// Built once at startup from configuration and handed to the token codec by
/// value. It is never mutated afterwards, so rotating the secret means
/// restarting the process.
#[derive(Clone)]
pub struct SigningContext {
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SigningContext {
    /// Longest accepted token lifetime, in days.
    pub const MAX_TTL_DAYS: i64 = 3650;

    /// Create a signing context.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret; should be at least 32 bytes for HS256
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    ///
    /// # Errors
    /// * `EmptySecret` - `secret` is empty
    /// * `NonPositiveTtl` - either TTL is zero or negative
    /// * `ExcessiveTtl` - either TTL is longer than [`Self::MAX_TTL_DAYS`]
    pub fn new(
        secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, SigningContextError> {
        if secret.is_empty() {
            return Err(SigningContextError::EmptySecret);
        }
        if access_ttl <= Duration::zero() {
            return Err(SigningContextError::NonPositiveTtl("access"));
        }
        if refresh_ttl <= Duration::zero() {
            return Err(SigningContextError::NonPositiveTtl("refresh"));
        }
        let max_ttl = Duration::days(Self::MAX_TTL_DAYS);
        if access_ttl > max_ttl {
            return Err(SigningContextError::ExcessiveTtl("access", Self::MAX_TTL_DAYS));
        }
        if refresh_ttl > max_ttl {
            return Err(SigningContextError::ExcessiveTtl("refresh", Self::MAX_TTL_DAYS));
        }

        Ok(Self {
            secret: secret.to_vec(),
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
