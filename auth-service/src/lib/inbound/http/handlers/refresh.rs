use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairResponseData;
use crate::account::errors::InvalidArgument;
use crate::account::models::BearerToken;
use crate::account::models::RefreshToken;
use crate::account::models::RefreshTokensCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<TokenPairResponseData>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state
        .account_service
        .refresh_tokens(body.try_into_command(authorization)?)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh_token: String,
}

impl RefreshRequestBody {
    fn try_into_command(
        self,
        authorization: Option<&str>,
    ) -> Result<RefreshTokensCommand, InvalidArgument> {
        let refresh_token = RefreshToken::new(self.refresh_token)?;
        let access_token = BearerToken::from_header(authorization)?;
        Ok(RefreshTokensCommand {
            access_token,
            refresh_token,
        })
    }
}
