use chrono::DateTime;
use chrono::Utc;

use super::claims::SessionIdentity;
use super::codec::TokenCodec;
use super::context::SigningContext;
use super::errors::TokenError;

/// Access/refresh token pair handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues token pairs and rotates them on refresh.
///
/// Sessions are stateless: both tokens are self-contained and nothing is
/// recorded server-side, so a token stays valid until its own `exp` even
/// after it has been rotated away. Early revocation is not supported.
pub struct TokenLifecycle {
    codec: TokenCodec,
}

impl TokenLifecycle {
    pub fn new(context: SigningContext) -> Self {
        Self {
            codec: TokenCodec::new(context),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issue a fresh, independently expiring access/refresh pair.
    pub fn issue(&self, identity: &SessionIdentity) -> Result<TokenPair, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &SessionIdentity,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.codec.encode_access(identity, now)?,
            refresh_token: self.codec.encode_refresh(&identity.uid, now)?,
        })
    }

    /// Exchange a (possibly expired) access token and a live refresh token
    /// for a brand-new pair.
    ///
    /// # Errors
    /// * `InvalidSignature` / `MalformedToken` / `MalformedClaims` - either
    ///   token fails to decode
    /// * `IdentityMismatch` - the tokens name different subjects
    /// * `ExpiredToken` - the refresh token is past its `exp`
    pub fn rotate(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, TokenError> {
        self.rotate_at(access_token, refresh_token, Utc::now())
    }

    pub fn rotate_at(
        &self,
        access_token: &str,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        // Access expiry is deliberately not checked: only its identity is used.
        let access = self.codec.decode_access(access_token)?;
        let refresh = self.codec.decode_refresh(refresh_token)?;

        if access.uid != refresh.uid {
            return Err(TokenError::IdentityMismatch);
        }
        if refresh.is_expired(now.timestamp()) {
            return Err(TokenError::ExpiredToken);
        }

        self.issue_at(&access.identity(), now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::claims::RefreshClaims;

    fn lifecycle() -> TokenLifecycle {
        TokenLifecycle::new(
            SigningContext::new(
                b"test_secret_key_at_least_32_bytes!",
                Duration::minutes(15),
                Duration::days(7),
            )
            .unwrap(),
        )
    }

    fn alice() -> SessionIdentity {
        SessionIdentity::new("u1", "a@b.com", "alice")
    }

    fn bob() -> SessionIdentity {
        SessionIdentity::new("u2", "bob@b.com", "bob")
    }

    #[test]
    fn test_issue_produces_independent_tokens_for_same_subject() {
        let lifecycle = lifecycle();
        let now = Utc::now();

        let pair = lifecycle.issue_at(&alice(), now).expect("Failed to issue");
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = lifecycle.codec().decode_access(&pair.access_token).unwrap();
        let refresh = lifecycle.codec().decode_refresh(&pair.refresh_token).unwrap();

        assert_eq!(access.identity(), alice());
        assert_eq!(refresh.uid, "u1");
        assert_eq!(access.exp, (now + Duration::minutes(15)).timestamp());
        assert_eq!(refresh.exp, (now + Duration::days(7)).timestamp());
    }

    #[test]
    fn test_rotate_with_expired_access_and_live_refresh() {
        let lifecycle = lifecycle();
        let issued_at = Utc::now() - Duration::hours(2);
        let old = lifecycle.issue_at(&alice(), issued_at).unwrap();

        let old_access = lifecycle.codec().decode_access(&old.access_token).unwrap();
        let old_refresh = lifecycle.codec().decode_refresh(&old.refresh_token).unwrap();
        assert!(old_access.is_expired(Utc::now().timestamp()));

        let new = lifecycle
            .rotate(&old.access_token, &old.refresh_token)
            .expect("Rotation should succeed");

        let new_access = lifecycle.codec().decode_access(&new.access_token).unwrap();
        let new_refresh = lifecycle.codec().decode_refresh(&new.refresh_token).unwrap();

        assert_eq!(new_access.identity(), alice());
        assert_eq!(new_refresh.uid, "u1");
        assert!(new_access.exp > old_access.exp);
        assert!(new_refresh.exp > old_refresh.exp);
    }

    #[test]
    fn test_rotate_rejects_identity_mismatch() {
        let lifecycle = lifecycle();
        let alice_pair = lifecycle.issue(&alice()).unwrap();
        let bob_pair = lifecycle.issue(&bob()).unwrap();

        let result = lifecycle.rotate(&alice_pair.access_token, &bob_pair.refresh_token);
        assert_eq!(result.unwrap_err(), TokenError::IdentityMismatch);
    }

    #[test]
    fn test_rotate_rejects_expired_refresh_token() {
        let lifecycle = lifecycle();
        let now = Utc::now();
        let access = lifecycle.codec().encode_access(&alice(), now).unwrap();
        let refresh = lifecycle
            .codec()
            .sign(&RefreshClaims::new("u1", now.timestamp() - 1))
            .unwrap();

        let result = lifecycle.rotate_at(&access, &refresh, now);
        assert_eq!(result.unwrap_err(), TokenError::ExpiredToken);
    }

    #[test]
    fn test_rotate_refresh_valid_until_exact_expiry() {
        let lifecycle = lifecycle();
        let now = Utc::now();
        let access = lifecycle.codec().encode_access(&alice(), now).unwrap();
        let refresh = lifecycle
            .codec()
            .sign(&RefreshClaims::new("u1", now.timestamp()))
            .unwrap();

        assert!(lifecycle.rotate_at(&access, &refresh, now).is_ok());
    }

    #[test]
    fn test_identity_is_checked_before_expiry() {
        let lifecycle = lifecycle();
        let now = Utc::now();
        let access = lifecycle.codec().encode_access(&alice(), now).unwrap();
        let stale_foreign_refresh = lifecycle
            .codec()
            .sign(&RefreshClaims::new("u2", now.timestamp() - 3600))
            .unwrap();

        let result = lifecycle.rotate_at(&access, &stale_foreign_refresh, now);
        assert_eq!(result.unwrap_err(), TokenError::IdentityMismatch);
    }

    #[test]
    fn test_rotate_rejects_swapped_tokens() {
        let lifecycle = lifecycle();
        let pair = lifecycle.issue(&alice()).unwrap();

        let result = lifecycle.rotate(&pair.refresh_token, &pair.access_token);
        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn test_rotate_rejects_foreign_signatures() {
        let lifecycle = lifecycle();
        let foreign = TokenLifecycle::new(
            SigningContext::new(
                b"another_secret_key_at_least_32_bytes",
                Duration::minutes(15),
                Duration::days(7),
            )
            .unwrap(),
        );
        let pair = lifecycle.issue(&alice()).unwrap();
        let forged = foreign.issue(&alice()).unwrap();

        assert_eq!(
            lifecycle
                .rotate(&pair.access_token, &forged.refresh_token)
                .unwrap_err(),
            TokenError::InvalidSignature
        );
        assert_eq!(
            lifecycle
                .rotate(&forged.access_token, &pair.refresh_token)
                .unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_rotated_away_tokens_remain_usable() {
        let lifecycle = lifecycle();
        let first = lifecycle.issue(&alice()).unwrap();
        let _second = lifecycle
            .rotate(&first.access_token, &first.refresh_token)
            .unwrap();

        // No revocation list: the old pair still rotates until it expires.
        assert!(lifecycle
            .rotate(&first.access_token, &first.refresh_token)
            .is_ok());
    }
}
