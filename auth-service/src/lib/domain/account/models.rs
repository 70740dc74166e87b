use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::account::errors::BearerTokenError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordError;
use crate::account::errors::RefreshTokenError;
use crate::account::errors::UserIdError;
use crate::account::errors::UsernameError;

/// User identifier as issued by the user directory.
///
/// Opaque to this service; only the email-verification flow insists on a
/// well-formed UUID (see [`UserId::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier returned by the directory.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a caller-supplied identifier, requiring UUID syntax.
    ///
    /// # Errors
    /// * `Empty` - String is empty
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }
        Uuid::parse_str(s)
            .map(|_| Self(s.to_string()))
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name chosen at registration. Must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password. Only lives for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Access token taken from an `authorization: Bearer <token>` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    const SCHEME: &'static str = "Bearer ";

    /// Parse the raw header value, if the transport supplied one.
    ///
    /// # Errors
    /// * `Missing` - No authorization header
    /// * `InvalidScheme` - Header does not start with `Bearer `
    /// * `Empty` - Nothing follows the scheme
    pub fn from_header(header: Option<&str>) -> Result<Self, BearerTokenError> {
        let header = header.ok_or(BearerTokenError::Missing)?;
        let token = header
            .strip_prefix(Self::SCHEME)
            .ok_or(BearerTokenError::InvalidScheme)?
            .trim();

        if token.is_empty() {
            return Err(BearerTokenError::Empty);
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Refresh token as presented by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new(token: String) -> Result<Self, RefreshTokenError> {
        if token.is_empty() {
            return Err(RefreshTokenError::Empty);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(<redacted>)")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
    pub description: String,
    pub profile_image: Vec<u8>,
}

/// Command to exchange credentials for a token pair
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

/// Command to confirm ownership of the email address of `user_id`
#[derive(Debug)]
pub struct VerifyEmailCommand {
    pub user_id: UserId,
}

/// Command to rotate a token pair
#[derive(Debug)]
pub struct RefreshTokensCommand {
    pub access_token: BearerToken,
    pub refresh_token: RefreshToken,
}

/// User record handed to the directory on registration.
///
/// Carries the password hash only; the plaintext never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub description: String,
    pub profile_image: Vec<u8>,
}

/// User record returned by a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// Template variables of the verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub user_id: UserId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse_requires_uuid() {
        let id = "6f1c2a8e-7d4b-4b1e-9a52-0c3e2f1d9b77";
        assert_eq!(UserId::parse(id).unwrap().as_str(), id);

        assert_eq!(UserId::parse("").unwrap_err(), UserIdError::Empty);
        assert!(matches!(
            UserId::parse("u1"),
            Err(UserIdError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_directory_ids_are_opaque() {
        assert_eq!(UserId::new("u1").to_string(), "u1");
    }

    #[test]
    fn test_username_must_not_be_blank() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert_eq!(
            Username::new(String::new()).unwrap_err(),
            UsernameError::Empty
        );
        assert_eq!(
            Username::new("   ".to_string()).unwrap_err(),
            UsernameError::Empty
        );
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(
            EmailAddress::new("a@b.com".to_string()).unwrap().as_str(),
            "a@b.com"
        );
        assert_eq!(
            EmailAddress::new(String::new()).unwrap_err(),
            EmailError::Empty
        );
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(matches!(
            EmailAddress::new("a@".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_password_must_not_be_empty_and_is_redacted() {
        assert_eq!(Password::new(String::new()).unwrap_err(), PasswordError::Empty);

        let password = Password::new("pw123".to_string()).unwrap();
        assert_eq!(password.as_str(), "pw123");
        assert!(!format!("{:?}", password).contains("pw123"));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = BearerToken::from_header(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");

        assert_eq!(
            BearerToken::from_header(None).unwrap_err(),
            BearerTokenError::Missing
        );
        assert_eq!(
            BearerToken::from_header(Some("Basic dXNlcjpwYXNz")).unwrap_err(),
            BearerTokenError::InvalidScheme
        );
        assert_eq!(
            BearerToken::from_header(Some("abc.def.ghi")).unwrap_err(),
            BearerTokenError::InvalidScheme
        );
        assert_eq!(
            BearerToken::from_header(Some("bearer abc.def.ghi")).unwrap_err(),
            BearerTokenError::InvalidScheme
        );
        assert_eq!(
            BearerToken::from_header(Some("Bearer ")).unwrap_err(),
            BearerTokenError::Empty
        );
    }

    #[test]
    fn test_refresh_token_must_not_be_empty() {
        assert_eq!(
            RefreshToken::new(String::new()).unwrap_err(),
            RefreshTokenError::Empty
        );
        assert!(RefreshToken::new("x.y.z".to_string()).is_ok());
    }
}
