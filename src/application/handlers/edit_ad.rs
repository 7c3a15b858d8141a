//! EditAdHandler - overlays replacement content onto an ad.

use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::adapters::kv::EditedAdsRepo;
use crate::domain::ad::{AdEdit, AdId, EditedAds};
use crate::ports::{KvError, KvStore};

/// Command to edit one ad's content
#[derive(Debug, Clone)]
pub struct EditAdCommand {
    pub ad_id: AdId,
    pub ad_copy: String,
    pub ad_url: String,
    pub notes: String,
}

/// Handler for ad edits.
///
/// Edits never touch the purchase record; they live in the
/// `edited_ads` document and win over the original copy at
/// reconciliation time. The latest edit replaces any earlier one.
pub struct EditAdHandler {
    edits: EditedAdsRepo,
}

impl EditAdHandler {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            edits: EditedAdsRepo::new(kv),
        }
    }

    pub async fn handle(&self, cmd: EditAdCommand) -> Result<(), KvError> {
        let edit = AdEdit {
            ad_copy: cmd.ad_copy,
            ad_url: cmd.ad_url,
            notes: cmd.notes,
            edited_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.edits.upsert(cmd.ad_id.clone(), edit).await?;
        tracing::info!(ad_id = %cmd.ad_id, "ad edited");
        Ok(())
    }

    /// Dump the whole edits document (debug endpoint)
    pub async fn list(&self) -> Result<EditedAds, KvError> {
        self.edits.load().await
    }
}
