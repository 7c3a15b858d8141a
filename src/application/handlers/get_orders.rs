//! GetOrdersHandler - the admin reconciliation view.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::kv::{CancelledAdsRepo, EditedAdsRepo, SentReportsRepo};
use crate::domain::ad::{reconcile, ReconciledOrders};
use crate::ports::{CheckoutGateway, GatewayError, KvError, KvStore};

/// How many recent sessions one reconciliation pass covers
pub const SESSION_FETCH_LIMIT: u32 = 100;

/// Errors from building the orders view
#[derive(Debug, Error)]
pub enum OrdersError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] KvError),
}

/// Handler for the admin orders view.
///
/// Fetches recent completed sessions, loads the three override
/// documents, and hands everything to the pure reconciliation logic.
pub struct GetOrdersHandler {
    gateway: Arc<dyn CheckoutGateway>,
    cancelled: CancelledAdsRepo,
    edits: EditedAdsRepo,
    reports: SentReportsRepo,
}

impl GetOrdersHandler {
    pub fn new(gateway: Arc<dyn CheckoutGateway>, kv: Arc<dyn KvStore>) -> Self {
        Self {
            gateway,
            cancelled: CancelledAdsRepo::new(kv.clone()),
            edits: EditedAdsRepo::new(kv.clone()),
            reports: SentReportsRepo::new(kv),
        }
    }

    pub async fn handle(&self) -> Result<ReconciledOrders, OrdersError> {
        let sessions = self
            .gateway
            .list_completed_sessions(SESSION_FETCH_LIMIT)
            .await?;

        let cancelled = self.cancelled.load().await?;
        let edits = self.edits.load().await?;
        let reports = self.reports.load().await?;

        Ok(reconcile(
            &sessions,
            &cancelled,
            &edits,
            &reports,
            Utc::now().date_naive(),
        ))
    }
}
