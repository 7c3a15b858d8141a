//! Stripe webhook verification domain
//!
//! Signature parsing and HMAC verification for incoming webhook
//! deliveries, plus the event types the service reacts to.

mod errors;
mod event;
mod verifier;

pub use errors::WebhookError;
pub use event::{StripeEvent, StripeEventData, CHECKOUT_SESSION_COMPLETED};
pub use verifier::{SignatureHeader, WebhookVerifier, SIGNATURE_TOLERANCE_SECS};
