//! Stripe webhook signature verification
//!
//! Stripe signs each webhook delivery with an HMAC-SHA256 over
//! `"{timestamp}.{payload}"` and sends the result in the
//! `stripe-signature` header as comma-separated `key=value` pairs.
//! Verification checks the timestamp freshness first, then compares the
//! expected signature in constant time. The payload is only parsed as
//! JSON after the signature verifies.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::StripeEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed clock skew between the signature timestamp and now,
/// in either direction
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Parsed `stripe-signature` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp the payload was signed at (`t=`)
    pub timestamp: i64,

    /// Hex-encoded HMAC-SHA256 signature (`v1=`)
    pub signature: String,
}

impl SignatureHeader {
    /// Parse a `stripe-signature` header value
    ///
    /// The header is comma-separated `key=value` pairs. Only `t` and `v1`
    /// are consumed; unknown keys (future signature schemes) are ignored.
    /// The first occurrence of each key wins.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut signature = None;

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" if timestamp.is_none() => {
                    let parsed = value.parse::<i64>().map_err(|_| {
                        WebhookError::MalformedHeader(format!("invalid timestamp: {value}"))
                    })?;
                    timestamp = Some(parsed);
                }
                "v1" if signature.is_none() => {
                    signature = Some(value.to_string());
                }
                _ => {}
            }
        }

        match (timestamp, signature) {
            (Some(timestamp), Some(signature)) => Ok(Self { timestamp, signature }),
            (None, _) => Err(WebhookError::MalformedHeader(
                "missing timestamp (t=)".to_string(),
            )),
            (_, None) => Err(WebhookError::MalformedHeader(
                "missing signature (v1=)".to_string(),
            )),
        }
    }
}

/// Verifies Stripe webhook signatures against a shared signing secret
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Verify a webhook delivery and parse the payload as a Stripe event
    ///
    /// # Errors
    ///
    /// - [`WebhookError::MalformedHeader`] when the header lacks `t`/`v1`
    /// - [`WebhookError::StaleSignature`] when `|now - t|` exceeds the
    ///   tolerance window
    /// - [`WebhookError::SignatureMismatch`] when the HMAC does not match
    /// - [`WebhookError::MalformedPayload`] when the (verified) payload is
    ///   not valid event JSON
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        self.verify_and_parse_at(payload, signature_header, Utc::now().timestamp())
    }

    /// Same as [`verify_and_parse`](Self::verify_and_parse) with an
    /// explicit clock, so freshness checks are testable.
    pub fn verify_and_parse_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        if (now - header.timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(WebhookError::StaleSignature);
        }

        let expected = self.compute_signature(header.timestamp, payload);
        let provided = hex::decode(&header.signature)
            .map_err(|_| WebhookError::SignatureMismatch)?;

        if expected.ct_eq(provided.as_slice()).unwrap_u8() != 1 {
            return Err(WebhookError::SignatureMismatch);
        }

        serde_json::from_slice(payload)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    /// Hex-encode the expected signature for a timestamped payload
    ///
    /// Exposed so tests can construct valid `stripe-signature` headers.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> String {
        hex::encode(self.compute_signature(timestamp, payload))
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take a key of any size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
