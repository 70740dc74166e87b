use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use super::template;
use crate::account::errors::DeliveryError;
use crate::account::models::EmailAddress;
use crate::account::models::VerificationEmail;
use crate::account::ports::EmailDispatcher;
use crate::config::MailConfig;

/// [`EmailDispatcher`] sending through an SMTP relay.
pub struct SmtpEmailDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    verification_url: String,
}

impl SmtpEmailDispatcher {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, DeliveryError> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::InvalidAddress(e.to_string()))?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| DeliveryError::Send(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self {
            transport,
            from,
            verification_url: config.verification_url.clone(),
        })
    }

    fn build_message(
        &self,
        to: &EmailAddress,
        email: &VerificationEmail,
    ) -> Result<Message, DeliveryError> {
        let to = to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::InvalidAddress(e.to_string()))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(template::VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(template::render(&self.verification_url, email))
            .map_err(|e| DeliveryError::Message(e.to_string()))
    }
}

#[async_trait]
impl EmailDispatcher for SmtpEmailDispatcher {
    async fn send_verification(
        &self,
        to: &EmailAddress,
        email: &VerificationEmail,
    ) -> Result<(), DeliveryError> {
        let message = self.build_message(to, email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        tracing::info!(user_id = %email.user_id, "Verification email sent");

        Ok(())
    }
}
