//! CreateCheckoutHandler - opens a hosted checkout session for a booking.

use std::sync::Arc;
use thiserror::Error;

use crate::adapters::kv::order_key;
use crate::config::PaymentConfig;
use crate::domain::ad::{AdType, BookingOrder};
use crate::ports::{
    CheckoutGateway, CreateSessionRequest, GatewayError, KvStore, LineItem,
};

/// How long an unpaid order stays cached for webhook retrieval
pub const ORDER_CACHE_TTL_SECS: u64 = 86_400;

/// Upper bound Stripe places on each metadata value
pub const MAX_METADATA_CHARS: usize = 500;

/// Longest ad copy the newsletter layout can take
pub const MAX_AD_COPY_CHARS: usize = 280;

/// Errors from checkout creation
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Command to open a checkout session
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub order: BookingOrder,
}

/// Result of successful checkout creation
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub session_id: String,
    /// Hosted payment page to redirect the customer to
    pub checkout_url: String,
}

/// Handler for creating checkout sessions.
///
/// The full order is cached in KV for 24 hours so the webhook can
/// recover it; a cache failure only degrades the webhook to its
/// metadata fallback, so it never blocks the sale.
pub struct CreateCheckoutHandler {
    gateway: Arc<dyn CheckoutGateway>,
    kv: Arc<dyn KvStore>,
    payment: PaymentConfig,
}

impl CreateCheckoutHandler {
    pub fn new(
        gateway: Arc<dyn CheckoutGateway>,
        kv: Arc<dyn KvStore>,
        payment: PaymentConfig,
    ) -> Self {
        Self {
            gateway,
            kv,
            payment,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        let order = &cmd.order;

        // 1. Validate the booking
        validate(order)?;

        // 2. Map slot types to catalog prices
        let line_items = order
            .items
            .iter()
            .map(|item| LineItem {
                price_id: match item.ad_type {
                    AdType::Premium => self.payment.premium_price_id.clone(),
                    _ => self.payment.unclassified_price_id.clone(),
                },
                quantity: 1,
            })
            .collect();

        // 3. Pack the order into session metadata. Stripe caps each value
        //    at 500 characters, so the summary and item JSON are truncated;
        //    the untruncated order also rides on the payment intent and in
        //    the KV cache.
        let order_summary = order
            .items
            .iter()
            .map(|item| {
                let label = match item.ad_type {
                    AdType::Premium => "Premium",
                    _ => "Unclassified",
                };
                format!(
                    "{} - Issue #{} ({})",
                    label, item.issue_number, item.date_formatted
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        let items_json =
            serde_json::to_string(&order.items).unwrap_or_else(|_| "[]".to_string());
        let full_order_json =
            serde_json::to_string(order).unwrap_or_else(|_| "{}".to_string());

        let request = CreateSessionRequest {
            customer_email: order.email.clone(),
            line_items,
            success_url: format!(
                "{}?session_id={{CHECKOUT_SESSION_ID}}",
                self.payment.success_url
            ),
            cancel_url: self.payment.cancel_url.clone(),
            metadata: vec![
                ("customer_name".to_string(), order.name.clone()),
                ("customer_email".to_string(), order.email.clone()),
                ("company".to_string(), order.company.clone()),
                (
                    "order_summary".to_string(),
                    truncate_chars(&order_summary, MAX_METADATA_CHARS),
                ),
                (
                    "order_data".to_string(),
                    truncate_chars(&items_json, MAX_METADATA_CHARS),
                ),
            ],
            payment_metadata: vec![("full_order".to_string(), full_order_json.clone())],
        };

        // 4. Open the session
        let session = self.gateway.create_session(request).await?;

        // 5. Cache the full order for the webhook, best effort
        if let Err(err) = self
            .kv
            .put_with_ttl(&order_key(&session.id), full_order_json, ORDER_CACHE_TTL_SECS)
            .await
        {
            tracing::warn!(
                error = %err,
                session_id = %session.id,
                "order cache write failed, webhook will fall back to metadata"
            );
        }

        Ok(CreateCheckoutResult {
            session_id: session.id,
            checkout_url: session.url,
        })
    }
}

fn validate(order: &BookingOrder) -> Result<(), CheckoutError> {
    if order.name.is_empty() || order.email.is_empty() || order.items.is_empty() {
        return Err(CheckoutError::Validation("Missing required fields"));
    }
    for item in &order.items {
        if item.ad_copy.is_empty() || item.ad_url.is_empty() {
            return Err(CheckoutError::Validation("All ads must have copy and URL"));
        }
        if item.ad_copy.chars().count() > MAX_AD_COPY_CHARS {
            return Err(CheckoutError::Validation(
                "Ad copy must be 280 characters or less",
            ));
        }
    }
    Ok(())
}

/// Truncate to at most `max` characters, never splitting a code point
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((index, _)) => s[..index].to_string(),
        None => s.to_string(),
    }
}
