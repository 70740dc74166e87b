use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::register;
use super::handlers::update_tokens;
use super::handlers::verify_email;
use crate::account::ports::AccountServicePort;
use crate::proto::auth::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::auth::LoginRequest;
use crate::proto::auth::LoginResponse;
use crate::proto::auth::RegisterRequest;
use crate::proto::auth::RegisterResponse;
use crate::proto::auth::UpdateTokensRequest;
use crate::proto::auth::UpdateTokensResponse;
use crate::proto::auth::VerifyEmailRequest;
use crate::proto::auth::VerifyEmailResponse;

/// Metadata key carrying `Bearer <access token>` on UpdateTokens.
const AUTHORIZATION: &str = "authorization";

pub struct AuthGrpcService<S: AccountServicePort> {
    service: Arc<S>,
}

impl<S: AccountServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S: AccountServicePort> AuthServiceProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn verify_email(
        &self,
        request: Request<VerifyEmailRequest>,
    ) -> Result<Response<VerifyEmailResponse>, Status> {
        let response =
            verify_email::verify_email(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn update_tokens(
        &self,
        request: Request<UpdateTokensRequest>,
    ) -> Result<Response<UpdateTokensResponse>, Status> {
        // A non-ASCII value is treated like an absent header.
        let authorization = request
            .metadata()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let response = update_tokens::update_tokens(
            self.service.as_ref(),
            authorization.as_deref(),
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }
}
