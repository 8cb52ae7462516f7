use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::Error as SmtpError;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::EmailConfig;
use crate::domain::user::ports::ResetNotifier;
use crate::user::errors::NotifierError;

/// SMTP delivery of password-reset links.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Create a new notifier from configuration.
    ///
    /// # Errors
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl ResetNotifier for SmtpNotifier {
    async fn send_reset_link(&self, recipient: &str, link: &str) -> Result<(), NotifierError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotifierError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| NotifierError::InvalidAddress(recipient.to_string()))?)
            .subject("Password reset link")
            .header(ContentType::TEXT_PLAIN)
            .body(format!("Click following link to reset password {}", link))
            .map_err(|e| NotifierError::MessageBuild(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotifierError::SendFailed(e.to_string()))?;

        tracing::info!(recipient, "Password reset link sent");
        Ok(())
    }
}
