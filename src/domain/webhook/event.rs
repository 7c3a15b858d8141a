//! Stripe webhook event types

use serde::{Deserialize, Serialize};

use crate::domain::ad::SessionSummary;

/// Event type emitted when a checkout session finishes paying
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// A Stripe webhook event, parsed after signature verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEvent {
    /// Event ID (evt_...)
    #[serde(default)]
    pub id: String,

    /// Event type, e.g. "checkout.session.completed"
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event payload
    pub data: StripeEventData,
}

/// The `data` envelope of a Stripe event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEventData {
    /// The object the event describes; shape depends on `event_type`
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Whether this event signals a completed checkout session
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == CHECKOUT_SESSION_COMPLETED
    }

    /// Extract the checkout session from the event payload
    pub fn checkout_session(&self) -> Result<SessionSummary, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}
