pub mod claims;
pub mod codec;
pub mod context;
pub mod errors;
pub mod lifecycle;

pub use claims::AccessClaims;
pub use claims::RefreshClaims;
pub use claims::SessionIdentity;
pub use codec::TokenCodec;
pub use context::SigningContext;
pub use errors::SigningContextError;
pub use errors::TokenError;
pub use lifecycle::TokenLifecycle;
pub use lifecycle::TokenPair;
