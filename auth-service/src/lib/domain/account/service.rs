use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SessionIdentity;
use auth::TokenError;
use auth::TokenPair;

use crate::account::errors::AccountError;
use crate::account::errors::DirectoryError;
use crate::account::models::LoginCommand;
use crate::account::models::NewUser;
use crate::account::models::RefreshTokensCommand;
use crate::account::models::RegisterCommand;
use crate::account::models::UserId;
use crate::account::models::VerificationEmail;
use crate::account::models::VerifyEmailCommand;
use crate::account::ports::AccountServicePort;
use crate::account::ports::EmailDispatcher;
use crate::account::ports::UserDirectory;

/// Domain service implementation for account operations.
///
/// Commands arrive already validated, so nothing here talks to the directory
/// with malformed input.
pub struct AccountService<UD, ED>
where
    UD: UserDirectory,
    ED: EmailDispatcher,
{
    directory: Arc<UD>,
    email_dispatcher: Arc<ED>,
    authenticator: Arc<Authenticator>,
}

impl<UD, ED> AccountService<UD, ED>
where
    UD: UserDirectory,
    ED: EmailDispatcher,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Remote user storage
    /// * `email_dispatcher` - Verification email sender
    /// * `authenticator` - Password hashing and token lifecycle
    pub fn new(
        directory: Arc<UD>,
        email_dispatcher: Arc<ED>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            directory,
            email_dispatcher,
            authenticator,
        }
    }
}

#[async_trait]
impl<UD, ED> AccountServicePort for AccountService<UD, ED>
where
    UD: UserDirectory,
    ED: EmailDispatcher,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AccountError::DependencyFailure(e.to_string())
            })?;

        let user = NewUser {
            email: command.email.clone(),
            username: command.username.clone(),
            password_hash,
            description: command.description,
            profile_image: command.profile_image,
        };

        let user_id = self.directory.create_user(user).await.map_err(|e| {
            tracing::error!(email = %command.email, error = %e, "Failed to create user");
            AccountError::DependencyFailure(e.to_string())
        })?;

        tracing::info!(user_id = %user_id, "User registered");

        // Registration already succeeded; delivery runs detached and its
        // failures are only logged.
        let email = VerificationEmail {
            user_id: user_id.clone(),
            name: command.username.as_str().to_string(),
        };
        let to = command.email;
        let email_dispatcher = Arc::clone(&self.email_dispatcher);
        tokio::spawn(async move {
            if let Err(e) = email_dispatcher.send_verification(&to, &email).await {
                tracing::error!(
                    user_id = %email.user_id,
                    error = %e,
                    "Failed to send verification email"
                );
            }
        });

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AccountError> {
        let user = match self.directory.get_user_by_email(&command.email).await {
            Ok(user) => user,
            Err(DirectoryError::NotFound) => {
                tracing::warn!(email = %command.email, "Login for unknown email");
                return Err(AccountError::AuthenticationFailed);
            }
            Err(e) => {
                tracing::error!(email = %command.email, error = %e, "User lookup failed");
                return Err(AccountError::DependencyFailure(e.to_string()));
            }
        };

        let identity = SessionIdentity::new(
            user.id.as_str(),
            command.email.as_str(),
            user.username.as_str(),
        );

        self.authenticator
            .authenticate(command.password.as_str(), &user.password_hash, &identity)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login with wrong password");
                    AccountError::AuthenticationFailed
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored hash unusable");
                    AccountError::DependencyFailure(err.to_string())
                }
                AuthenticationError::TokenError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Token issuance failed");
                    AccountError::DependencyFailure(err.to_string())
                }
            })
    }

    async fn verify_email(&self, command: VerifyEmailCommand) -> Result<(), AccountError> {
        self.directory
            .mark_email_verified(&command.user_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %command.user_id, error = %e, "Failed to verify email");
                AccountError::DependencyFailure(e.to_string())
            })?;

        tracing::info!(user_id = %command.user_id, "Email verified");
        Ok(())
    }

    async fn refresh_tokens(
        &self,
        command: RefreshTokensCommand,
    ) -> Result<TokenPair, AccountError> {
        self.authenticator
            .refresh_tokens(
                command.access_token.as_str(),
                command.refresh_token.as_str(),
            )
            .map_err(|e| match e {
                TokenError::EncodingFailed(msg) => {
                    tracing::error!(error = %msg, "Token issuance failed");
                    AccountError::DependencyFailure(msg)
                }
                rejected => {
                    tracing::warn!(error = %rejected, "Token rotation rejected");
                    AccountError::TokenRotation(rejected)
                }
            })
    }
}
