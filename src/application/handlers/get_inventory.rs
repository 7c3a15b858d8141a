//! GetInventoryHandler - public per-issue sold inventory.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::adapters::kv::CancelledAdsRepo;
use crate::domain::ad::{project_inventory, IssueInventory};
use crate::ports::{CheckoutGateway, KvStore};

use super::get_orders::SESSION_FETCH_LIMIT;

/// Handler for the public inventory endpoint.
///
/// Fails open: any upstream error yields an empty map, which the
/// booking page renders as "everything available". Overselling a slot
/// is recoverable by hand; an erroring booking page sells nothing.
pub struct GetInventoryHandler {
    gateway: Arc<dyn CheckoutGateway>,
    cancelled: CancelledAdsRepo,
}

impl GetInventoryHandler {
    pub fn new(gateway: Arc<dyn CheckoutGateway>, kv: Arc<dyn KvStore>) -> Self {
        Self {
            gateway,
            cancelled: CancelledAdsRepo::new(kv),
        }
    }

    pub async fn handle(&self) -> BTreeMap<String, IssueInventory> {
        let sessions = match self
            .gateway
            .list_completed_sessions(SESSION_FETCH_LIMIT)
            .await
        {
            Ok(sessions) => sessions,
            Err(err) => {
                tracing::warn!(error = %err, "inventory fetch failed, returning empty");
                return BTreeMap::new();
            }
        };

        let cancelled = match self.cancelled.load().await {
            Ok(cancelled) => cancelled,
            Err(err) => {
                tracing::warn!(error = %err, "cancellation load failed, returning empty");
                return BTreeMap::new();
            }
        };

        project_inventory(&sessions, &cancelled)
    }
}
