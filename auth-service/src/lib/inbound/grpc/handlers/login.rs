use tonic::Status;

use crate::account::errors::AccountError;
use crate::account::errors::InvalidArgument;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::ports::AccountServicePort;
use crate::proto::auth::LoginRequest;
use crate::proto::auth::LoginResponse;

pub async fn login<S: AccountServicePort>(
    service: &S,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let command = request.try_into_command().map_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Rejected login request");
        AccountError::from(e)
    })?;

    let pair = service.login(command).await?;

    Ok(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, InvalidArgument> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand { email, password })
    }
}
