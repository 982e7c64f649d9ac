//! Outgoing transactional email.

pub mod log_mailer;
pub mod sendgrid;
pub mod templates;

pub use log_mailer::LogMailer;
pub use sendgrid::SendGridMailer;
pub use templates::{AppointmentConfirmation, EmailTemplates, PaymentConfirmation};

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// A file carried inline with a message, already base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub disposition: String,
}

impl Attachment {
    pub fn pdf(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            filename: filename.into(),
            mime_type: "application/pdf".into(),
            disposition: "attachment".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers a fully rendered message. Implementations do not retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}
