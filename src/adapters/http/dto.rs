//! HTTP DTOs (Data Transfer Objects) for the booking API.
//!
//! These types define the JSON request/response structure and serve as
//! the boundary between HTTP and the application layer. Field names are
//! camelCase to match the frontend.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{CreateCheckoutResult, SendReportCommand};
use crate::domain::ad::{AdId, AdType, BookingOrder, OrderItem};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a checkout session for a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Customer name.
    pub name: String,
    /// Customer email for the Stripe session.
    pub email: String,
    /// Optional company name.
    #[serde(default)]
    pub company: String,
    /// Booked ad slots.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl From<CreateCheckoutRequest> for BookingOrder {
    fn from(request: CreateCheckoutRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            company: request.company,
            items: request.items,
        }
    }
}

/// Request to cancel (soft-delete) an ad.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAdRequest {
    /// The ad to cancel.
    pub ad_id: AdId,
}

/// Request to override an ad's copy and link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAdRequest {
    pub ad_id: AdId,
    pub ad_copy: String,
    pub ad_url: String,
    /// Internal notes, may be empty.
    #[serde(default)]
    pub notes: String,
}

/// Request to email a performance report to an advertiser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReportRequest {
    pub ad_id: AdId,
    #[serde(default)]
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub issue_number: String,
    #[serde(default)]
    pub date_formatted: String,
    #[serde(default)]
    pub ad_type: AdType,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub open_rate: f64,
}

impl From<SendReportRequest> for SendReportCommand {
    fn from(request: SendReportRequest) -> Self {
        Self {
            ad_id: request.ad_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            issue_number: request.issue_number,
            date_formatted: request.date_formatted,
            ad_type: request.ad_type,
            clicks: request.clicks,
            open_rate: request.open_rate,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a created checkout session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Hosted payment page to redirect the customer to.
    pub checkout_url: String,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            checkout_url: result.checkout_url,
        }
    }
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Generic error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
