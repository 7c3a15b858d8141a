//! Webhook verification error types

use thiserror::Error;

/// Errors that can occur during webhook verification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// The signature header is missing or malformed
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// The signature timestamp is outside the freshness window
    #[error("Signature timestamp outside tolerance window")]
    StaleSignature,

    /// The computed signature does not match the provided one
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The payload failed to parse after the signature verified
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl WebhookError {
    /// HTTP status to respond with
    ///
    /// Every verification failure maps to 400 so the payment processor
    /// stops retrying a request it signed wrong or too long ago.
    pub fn status_code(&self) -> u16 {
        400
    }
}
