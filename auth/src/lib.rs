//! Authentication core
//!
//! - Password hashing (Argon2id)
//! - Session token signing and verification (HS256)
//! - Access/refresh token issuance and rotation
//!
//! Everything here is synchronous and free of shared mutable state; the only
//! input besides call arguments is the immutable [`SigningContext`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use auth::{SessionIdentity, SigningContext, TokenLifecycle};
//! use chrono::Duration;
//!
//! let context = SigningContext::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! )
//! .unwrap();
//! let lifecycle = TokenLifecycle::new(context);
//!
//! let pair = lifecycle
//!     .issue(&SessionIdentity::new("u1", "a@b.com", "alice"))
//!     .unwrap();
//! let rotated = lifecycle
//!     .rotate(&pair.access_token, &pair.refresh_token)
//!     .unwrap();
//! let claims = lifecycle.codec().decode_access(&rotated.access_token).unwrap();
//! assert_eq!(claims.uid, "u1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::RefreshClaims;
pub use jwt::SessionIdentity;
pub use jwt::SigningContext;
pub use jwt::SigningContextError;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenLifecycle;
pub use jwt::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
