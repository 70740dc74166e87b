use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::transport::Endpoint;
use tonic::Code;
use tonic::Status;

use crate::account::errors::DirectoryError;
use crate::account::models::DirectoryUser;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::UserId;
use crate::account::ports::UserDirectory;
use crate::config::UserDirectoryConfig;
use crate::proto::user::user_directory_client::UserDirectoryClient;
use crate::proto::user::CreateUserRequest;
use crate::proto::user::GetUserByEmailRequest;
use crate::proto::user::VerifyEmailRequest;

/// [`UserDirectory`] backed by the user service's gRPC API.
pub struct GrpcUserDirectory {
    client: UserDirectoryClient<Channel>,
}

impl GrpcUserDirectory {
    /// Connect eagerly so an unreachable directory fails startup.
    pub async fn connect(config: &UserDirectoryConfig) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(config.grpc_url.clone())?
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .connect()
            .await?;

        tracing::info!(url = %config.grpc_url, "Connected to user directory");

        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            client: UserDirectoryClient::new(channel),
        }
    }
}

#[async_trait]
impl UserDirectory for GrpcUserDirectory {
    async fn create_user(&self, user: NewUser) -> Result<UserId, DirectoryError> {
        let request = tonic::Request::new(CreateUserRequest {
            email: user.email.as_str().to_string(),
            username: user.username.as_str().to_string(),
            password_hash: user.password_hash,
            description: user.description,
            profile_image: user.profile_image,
        });

        let mut client = self.client.clone();
        let response = client.create_user(request).await?.into_inner();

        if response.id.is_empty() {
            return Err(DirectoryError::Rejected(
                "directory returned an empty user id".to_string(),
            ));
        }

        Ok(UserId::new(response.id))
    }

    async fn get_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<DirectoryUser, DirectoryError> {
        let request = tonic::Request::new(GetUserByEmailRequest {
            email: email.as_str().to_string(),
        });

        let mut client = self.client.clone();
        let user = client.get_user_by_email(request).await?.into_inner();

        Ok(DirectoryUser {
            id: UserId::new(user.id),
            username: user.username,
            password_hash: user.password_hash,
        })
    }

    async fn mark_email_verified(&self, id: &UserId) -> Result<(), DirectoryError> {
        let request = tonic::Request::new(VerifyEmailRequest {
            id: id.as_str().to_string(),
        });

        let mut client = self.client.clone();
        client.verify_email(request).await?;

        Ok(())
    }
}

impl From<Status> for DirectoryError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::NotFound => DirectoryError::NotFound,
            Code::Unavailable
            | Code::DeadlineExceeded
            | Code::Cancelled
            | Code::Unknown
            | Code::Internal => DirectoryError::Unavailable(status.message().to_string()),
            _ => DirectoryError::Rejected(status.message().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_map_to_directory_errors() {
        assert_eq!(
            DirectoryError::from(Status::not_found("no such user")),
            DirectoryError::NotFound
        );
        assert_eq!(
            DirectoryError::from(Status::unavailable("down")),
            DirectoryError::Unavailable("down".to_string())
        );
        assert_eq!(
            DirectoryError::from(Status::deadline_exceeded("slow")),
            DirectoryError::Unavailable("slow".to_string())
        );
        assert_eq!(
            DirectoryError::from(Status::already_exists("duplicate email")),
            DirectoryError::Rejected("duplicate email".to_string())
        );
        assert_eq!(
            DirectoryError::from(Status::invalid_argument("bad")),
            DirectoryError::Rejected("bad".to_string())
        );
    }
}
