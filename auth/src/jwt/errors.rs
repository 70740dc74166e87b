use thiserror::Error;

/// Failures of token encoding, decoding and rotation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token claims are malformed: {0}")]
    MalformedClaims(String),

    #[error("Access and refresh tokens belong to different subjects")]
    IdentityMismatch,

    #[error("Token is expired")]
    ExpiredToken,
}

/// Rejected signing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningContextError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("{0} TTL must be positive")]
    NonPositiveTtl(&'static str),

    #[error("{0} TTL must not exceed {1} days")]
    ExcessiveTtl(&'static str, i64),
}
