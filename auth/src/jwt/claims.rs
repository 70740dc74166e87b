use serde::Deserialize;
use serde::Serialize;

/// Identity a session is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub uid: String,
    pub email: String,
    pub username: String,
}

impl SessionIdentity {
    pub fn new(
        uid: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            username: username.into(),
        }
    }
}

/// Payload of an access token.
///
/// Every field is required; a token missing one, or carrying one with the
/// wrong JSON type, does not decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub uid: String,
    pub email: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(identity: &SessionIdentity, exp: i64) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            username: identity.username.clone(),
            exp,
        }
    }

    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity::new(&self.uid, &self.email, &self.username)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Payload of a refresh token: the subject and an expiry, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub uid: String,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(uid: impl Into<String>, exp: i64) -> Self {
        Self {
            uid: uid.into(),
            exp,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_wire_keys() {
        let identity = SessionIdentity::new("u1", "a@b.com", "alice");
        let claims = AccessClaims::new(&identity, 1_700_000_000);

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "uid": "u1",
                "email": "a@b.com",
                "username": "alice",
                "exp": 1_700_000_000,
            })
        );
        assert_eq!(claims.identity(), identity);
    }

    #[test]
    fn test_refresh_claims_carry_only_subject_and_expiry() {
        let value = serde_json::to_value(RefreshClaims::new("u1", 42)).unwrap();
        assert_eq!(value, serde_json::json!({ "uid": "u1", "exp": 42 }));
    }

    #[test]
    fn test_is_expired() {
        let claims = RefreshClaims::new("u1", 1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }
}
