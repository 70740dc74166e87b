use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("id is required")]
    Empty,

    #[error("id is not a valid UUID: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username is required")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("email is not a valid address: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password is required")]
    Empty,
}

/// Error for `authorization: Bearer <token>` parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("access token is required")]
    Missing,

    #[error("wrong type of token, expected Bearer")]
    InvalidScheme,

    #[error("access token is empty")]
    Empty,
}

/// Error for RefreshToken validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("refresh token is required")]
    Empty,
}

/// Malformed or missing caller input, naming the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error(transparent)]
    UserId(#[from] UserIdError),

    #[error(transparent)]
    Username(#[from] UsernameError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Authorization(#[from] BearerTokenError),

    #[error(transparent)]
    RefreshToken(#[from] RefreshTokenError),
}

impl InvalidArgument {
    pub fn field(&self) -> &'static str {
        match self {
            InvalidArgument::UserId(_) => "id",
            InvalidArgument::Username(_) => "username",
            InvalidArgument::Email(_) => "email",
            InvalidArgument::Password(_) => "password",
            InvalidArgument::Authorization(_) => "authorization",
            InvalidArgument::RefreshToken(_) => "refresh_token",
        }
    }
}

/// Error returned by the user directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User not found")]
    NotFound,

    #[error("User directory unavailable: {0}")]
    Unavailable(String),

    #[error("User directory rejected the request: {0}")]
    Rejected(String),
}

/// Error for outbound email delivery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Failed to send message: {0}")]
    Send(String),
}

/// Top-level error for account operations.
///
/// `DependencyFailure` carries internal detail for logs only; inbound
/// adapters must not forward it to callers.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Invalid email or password")]
    AuthenticationFailed,

    #[error("Token rotation failed: {0}")]
    TokenRotation(#[from] TokenError),

    #[error("Dependency failure: {0}")]
    DependencyFailure(String),
}
