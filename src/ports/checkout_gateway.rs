//! Checkout gateway port (payment processor)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ad::SessionSummary;

/// Errors from the payment processor
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never reached the processor or timed out
    #[error("Payment gateway network error: {0}")]
    Network(String),

    /// The processor answered with an error status
    #[error("Payment gateway error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The processor answered 2xx but the body was not the expected shape
    #[error("Unexpected payment gateway response: {0}")]
    InvalidResponse(String),
}

/// One priced line item in a checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Catalog price ID on the processor's side
    pub price_id: String,
    pub quantity: u32,
}

/// Request to open a hosted checkout session
#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub customer_email: String,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    /// Session metadata, in insertion order
    pub metadata: Vec<(String, String)>,
    /// Metadata copied onto the resulting payment
    pub payment_metadata: Vec<(String, String)>,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            price_id: String::new(),
            quantity: 1,
        }
    }
}

/// A freshly created checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSession {
    pub id: String,
    /// Hosted payment page the customer is redirected to
    pub url: String,
}

/// Hosted-checkout operations the service needs from its payment
/// processor.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Open a hosted checkout session and return its redirect URL
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreatedSession, GatewayError>;

    /// Fetch up to `limit` most-recent completed checkout sessions
    async fn list_completed_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<SessionSummary>, GatewayError>;
}
