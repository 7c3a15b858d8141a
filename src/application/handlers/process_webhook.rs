//! ProcessWebhookHandler - reacts to completed checkout sessions.

use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::kv::{completed_key, order_key};
use crate::adapters::resend::templates;
use crate::config::EmailConfig;
use crate::domain::ad::{BookingOrder, CompletedOrder, SessionSummary};
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::{KvError, KvStore, MailError, Mailer, OutboundEmail};

/// Command carrying one raw webhook delivery
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    pub payload: Vec<u8>,
    /// Raw `stripe-signature` header value
    pub signature_header: String,
}

#[derive(Debug, Error)]
enum ProcessError {
    #[error(transparent)]
    Storage(#[from] KvError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("order data unparseable: {0}")]
    BadOrderData(String),
}

/// Handler for incoming payment webhooks.
///
/// Only signature failures surface to the caller. Once a delivery is
/// authenticated, processing errors are logged and swallowed so the
/// processor gets its 200 and does not retry a delivery we already
/// acted on partially.
pub struct ProcessWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    kv: Arc<dyn KvStore>,
    mailer: Arc<dyn Mailer>,
    email: EmailConfig,
}

impl ProcessWebhookHandler {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        kv: Arc<dyn KvStore>,
        mailer: Arc<dyn Mailer>,
        email: EmailConfig,
    ) -> Self {
        Self {
            verifier,
            kv,
            mailer,
            email,
        }
    }

    pub async fn handle(&self, cmd: ProcessWebhookCommand) -> Result<(), WebhookError> {
        // 1. Authenticate the delivery before touching the payload
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature_header)?;

        // 2. Only completed checkouts are of interest
        if !event.is_checkout_completed() {
            tracing::debug!(event_type = %event.event_type, "ignoring webhook event");
            return Ok(());
        }

        let session = match event.checkout_session() {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, event_id = %event.id, "webhook session unparseable");
                return Ok(());
            }
        };

        // 3. From here on, failures are ours to log, not Stripe's to retry
        if let Err(err) = self.process_completed_session(&session).await {
            tracing::error!(
                error = %err,
                session_id = %session.id,
                "webhook processing failed"
            );
        }

        Ok(())
    }

    async fn process_completed_session(
        &self,
        session: &SessionSummary,
    ) -> Result<(), ProcessError> {
        let order = self.load_order(session).await?;

        // Internal notification failure aborts so the team never misses a
        // sale silently; the retry here is manual (the order stays in KV).
        self.send_internal_notification(&order, session).await?;

        if let Err(err) = self.send_customer_confirmation(&order).await {
            tracing::warn!(
                error = %err,
                session_id = %session.id,
                "customer confirmation failed"
            );
        }

        // Persist the completed order, then drop the transient copy
        let completed = CompletedOrder {
            order,
            session_id: session.id.clone(),
            payment_intent: session.payment_intent.clone(),
            amount_total: session.amount_total,
            completed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let json = serde_json::to_string(&completed)
            .map_err(|e| ProcessError::BadOrderData(e.to_string()))?;
        self.kv.put(&completed_key(&session.id), json).await?;
        self.kv.delete(&order_key(&session.id)).await?;

        Ok(())
    }

    /// Load the cached full order, falling back to session metadata when
    /// the cache entry expired or was never written.
    async fn load_order(&self, session: &SessionSummary) -> Result<BookingOrder, ProcessError> {
        if let Some(stored) = self.kv.get(&order_key(&session.id)).await? {
            return serde_json::from_str(&stored)
                .map_err(|e| ProcessError::BadOrderData(e.to_string()));
        }

        let raw_items = session.meta("order_data");
        let items = if raw_items.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(raw_items)
                .map_err(|e| ProcessError::BadOrderData(e.to_string()))?
        };

        Ok(BookingOrder {
            name: session.meta("customer_name").to_string(),
            email: session.meta("customer_email").to_string(),
            company: session.meta("company").to_string(),
            items,
        })
    }

    async fn send_internal_notification(
        &self,
        order: &BookingOrder,
        session: &SessionSummary,
    ) -> Result<(), MailError> {
        let slots = order.items.len();
        let plural = if slots == 1 { "" } else { "s" };

        self.mailer
            .send(OutboundEmail {
                from: self.email.from_header(),
                to: self.email.notification_email.clone(),
                reply_to: Some(order.email.clone()),
                subject: format!(
                    "New Ad Order: {} slot{} - ${}",
                    slots,
                    plural,
                    order.total()
                ),
                html: templates::internal_notification(
                    order,
                    session.payment_intent.as_deref(),
                ),
            })
            .await
    }

    async fn send_customer_confirmation(&self, order: &BookingOrder) -> Result<(), MailError> {
        let order_date = Utc::now().format("%A, %B %-d, %Y").to_string();

        self.mailer
            .send(OutboundEmail {
                from: self.email.from_header(),
                to: order.email.clone(),
                reply_to: Some(self.email.notification_email.clone()),
                subject: format!("Your Ad Booking Confirmation - ${}", order.total()),
                html: templates::customer_confirmation(order, &order_date),
            })
            .await
    }
}
