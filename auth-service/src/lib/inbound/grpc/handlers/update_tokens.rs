use tonic::Status;

use crate::account::errors::AccountError;
use crate::account::errors::InvalidArgument;
use crate::account::models::BearerToken;
use crate::account::models::RefreshToken;
use crate::account::models::RefreshTokensCommand;
use crate::account::ports::AccountServicePort;
use crate::proto::auth::UpdateTokensRequest;
use crate::proto::auth::UpdateTokensResponse;

pub async fn update_tokens<S: AccountServicePort>(
    service: &S,
    authorization: Option<&str>,
    request: UpdateTokensRequest,
) -> Result<UpdateTokensResponse, Status> {
    let command = request.try_into_command(authorization).map_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Rejected update tokens request");
        AccountError::from(e)
    })?;

    let pair = service.refresh_tokens(command).await?;

    Ok(UpdateTokensResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })
}

impl UpdateTokensRequest {
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
