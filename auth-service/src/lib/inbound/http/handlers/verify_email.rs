use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::InvalidArgument;
use crate::account::models::UserId;
use crate::account::models::VerifyEmailCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Target of the link in the verification email.
pub async fn verify_email<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<VerifyEmailResponseData>, ApiError> {
    let user_id = UserId::parse(&id).map_err(InvalidArgument::from)?;

    state
        .account_service
        .verify_email(VerifyEmailCommand { user_id })
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, VerifyEmailResponseData { verified: true }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyEmailResponseData {
    pub verified: bool,
}
