use async_trait::async_trait;
use auth::TokenPair;

use crate::account::errors::AccountError;
use crate::account::errors::DeliveryError;
use crate::account::errors::DirectoryError;
use crate::account::models::DirectoryUser;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::NewUser;
use crate::account::models::RefreshTokensCommand;
use crate::account::models::RegisterCommand;
use crate::account::models::UserId;
use crate::account::models::VerificationEmail;
use crate::account::models::VerifyEmailCommand;

/// Port for account use-cases exposed to inbound adapters.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and send a verification email.
    ///
    /// # Arguments
    /// * `command` - Validated registration data
    ///
    /// # Returns
    /// Identifier assigned by the user directory
    ///
    /// # Errors
    /// * `DependencyFailure` - Hashing or the user directory failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AccountError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown email or wrong password
    /// * `DependencyFailure` - User directory unavailable or stored hash unusable
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AccountError>;

    /// Mark the user's email address as verified.
    ///
    /// # Errors
    /// * `DependencyFailure` - User directory call failed
    async fn verify_email(&self, command: VerifyEmailCommand) -> Result<(), AccountError>;

    /// Rotate an access/refresh token pair.
    ///
    /// # Errors
    /// * `TokenRotation` - Tokens are forged, malformed, mismatched or expired
    async fn refresh_tokens(
        &self,
        command: RefreshTokensCommand,
    ) -> Result<TokenPair, AccountError>;
}

/// Remote user storage.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `Rejected` - The directory refused the user (e.g. duplicate email)
    /// * `Unavailable` - The directory could not be reached in time
    async fn create_user(&self, user: NewUser) -> Result<UserId, DirectoryError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Unavailable` - The directory could not be reached in time
    async fn get_user_by_email(&self, email: &EmailAddress)
        -> Result<DirectoryUser, DirectoryError>;

    /// Flag the user's email address as verified.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    /// * `Unavailable` - The directory could not be reached in time
    async fn mark_email_verified(&self, id: &UserId) -> Result<(), DirectoryError>;
}

/// Outbound email delivery.
#[async_trait]
pub trait EmailDispatcher: Send + Sync + 'static {
    /// Send the account verification email to `to`.
    ///
    /// # Errors
    /// * `InvalidAddress` - Recipient address rejected by the mailer
    /// * `Message` - Message could not be assembled
    /// * `Send` - Delivery to the mail server failed
    async fn send_verification(
        &self,
        to: &EmailAddress,
        email: &VerificationEmail,
    ) -> Result<(), DeliveryError>;
}
