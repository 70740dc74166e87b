use tonic::Status;

use crate::account::errors::AccountError;

pub mod login;
pub mod register;
pub mod update_tokens;
pub mod verify_email;

/// Map domain failures onto gRPC statuses.
///
/// Only validation messages reach the caller verbatim; everything else gets a
/// fixed message so downstream error text never leaks.
impl From<AccountError> for Status {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidArgument(e) => Status::invalid_argument(e.to_string()),
            AccountError::AuthenticationFailed => {
                Status::unauthenticated("invalid email or password")
            }
            AccountError::TokenRotation(_) => Status::unauthenticated("failed to update tokens"),
            AccountError::DependencyFailure(_) => Status::internal("internal error"),
        }
    }
}
