use super::{Email, MailError, Mailer};
use async_trait::async_trait;

/// Stands in for a real provider when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "Mail delivery disabled, message not sent"
        );
        tracing::debug!("Text body:\n{}", email.text);
        Ok(())
    }
}
