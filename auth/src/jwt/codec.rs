use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::claims::SessionIdentity;
use super::context::SigningContext;
use super::errors::TokenError;

/// Signs and verifies session tokens (HS256).
///
/// Expiry is not enforced here: decoding returns the `exp` claim untouched
/// and callers compare it against their own clock. This is what lets the
/// refresh flow read an access token that has already expired.
pub struct TokenCodec {
    context: SigningContext,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    pub fn new(context: SigningContext) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(context.secret()),
            decoding_key: DecodingKey::from_secret(context.secret()),
            algorithm: Algorithm::HS256,
            context,
        }
    }

    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    /// Encode an access token for `identity`, expiring `access_ttl` after `now`.
    pub fn encode_access(
        &self,
        identity: &SessionIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = expires_at(now, self.context.access_ttl())?;
        self.sign(&AccessClaims::new(identity, exp))
    }

    /// Encode a refresh token for `uid`, expiring `refresh_ttl` after `now`.
    pub fn encode_refresh(&self, uid: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let exp = expires_at(now, self.context.refresh_ttl())?;
        self.sign(&RefreshClaims::new(uid, exp))
    }

    /// Sign an arbitrary claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - claims could not be serialized or signed
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token)
    }

    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode(token)
    }

    /// Verify a token's signature, then decode its payload into `T`.
    ///
    /// # Errors
    /// * `MalformedToken` - not three segments, or the header does not decode
    /// * `InvalidSignature` - signature mismatch or a foreign algorithm
    /// * `MalformedClaims` - payload lacks a field of `T` or has a mistyped one
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        // Header problems must not surface as claim errors.
        decode_header(token).map_err(|e| TokenError::MalformedToken(e.to_string()))?;

        decode::<T>(token, &self.decoding_key, &self.validation())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::Json(err) => TokenError::MalformedClaims(err.to_string()),
                _ => TokenError::MalformedToken(e.to_string()),
            })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
    }
}

fn expires_at(now: DateTime<Utc>, ttl: Duration) -> Result<i64, TokenError> {
    now.checked_add_signed(ttl)
        .map(|exp| exp.timestamp())
        .ok_or_else(|| TokenError::EncodingFailed("expiry is out of range".to_string()))
}
