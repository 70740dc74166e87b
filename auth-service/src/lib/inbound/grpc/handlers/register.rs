use tonic::Status;

use crate::account::errors::AccountError;
use crate::account::errors::InvalidArgument;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::proto::auth::RegisterRequest;
use crate::proto::auth::RegisterResponse;

pub async fn register<S: AccountServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let command = request.try_into_command().map_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Rejected register request");
        AccountError::from(e)
    })?;

    let user_id = service.register(command).await?;

    Ok(RegisterResponse {
        id: user_id.to_string(),
    })
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, InvalidArgument> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand {
            email,
            username,
            password,
            description: self.description,
            profile_image: self.profile_image,
        })
    }
}
