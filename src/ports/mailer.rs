//! Outbound email port

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the email provider
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email provider network error: {0}")]
    Network(String),

    #[error("Email provider error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// One HTML email ready to send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundEmail {
    /// "Name <address>" form
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Fire-and-forget email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}
