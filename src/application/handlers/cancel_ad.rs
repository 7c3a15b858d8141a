//! CancelAdHandler - marks an ad as cancelled.

use std::sync::Arc;

use crate::adapters::kv::CancelledAdsRepo;
use crate::domain::ad::AdId;
use crate::ports::{KvError, KvStore};

/// Handler for ad cancellation.
///
/// Cancellation is an override, not a deletion: the purchase record at
/// the payment processor is untouched and refunds stay manual.
pub struct CancelAdHandler {
    cancelled: CancelledAdsRepo,
}

impl CancelAdHandler {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            cancelled: CancelledAdsRepo::new(kv),
        }
    }

    /// Returns false when the ad was already cancelled
    pub async fn handle(&self, ad_id: AdId) -> Result<bool, KvError> {
        let added = self.cancelled.add(ad_id.clone()).await?;
        if added {
            tracing::info!(ad_id = %ad_id, "ad cancelled");
        }
        Ok(added)
    }
}
