use tonic::Status;

use crate::account::errors::AccountError;
use crate::account::errors::InvalidArgument;
use crate::account::models::UserId;
use crate::account::models::VerifyEmailCommand;
use crate::account::ports::AccountServicePort;
use crate::proto::auth::VerifyEmailRequest;
use crate::proto::auth::VerifyEmailResponse;

pub async fn verify_email<S: AccountServicePort>(
    service: &S,
    request: VerifyEmailRequest,
) -> Result<VerifyEmailResponse, Status> {
    let command = request.try_into_command().map_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Rejected verify email request");
        AccountError::from(e)
    })?;

    service.verify_email(command).await?;

    Ok(VerifyEmailResponse {})
}

impl VerifyEmailRequest {
    fn try_into_command(self) -> Result<VerifyEmailCommand, InvalidArgument> {
        let user_id = UserId::parse(&self.id)?;
        Ok(VerifyEmailCommand { user_id })
    }
}
