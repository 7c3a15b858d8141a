//! ExportBackupHandler - one-file export of everything in KV.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::kv::{CancelledAdsRepo, EditedAdsRepo, COMPLETED_KEY_PREFIX};
use crate::application::handlers::site_config::load_site_config;
use crate::domain::ad::{CancelledAds, EditedAds};
use crate::domain::site_config::SiteConfig;
use crate::ports::{KvError, KvStore};

/// The exported backup document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// RFC 3339 export time
    pub exported_at: String,
    pub completed_orders: Vec<serde_json::Value>,
    pub cancelled_ads: CancelledAds,
    pub edited_ads: EditedAds,
    pub site_config: SiteConfig,
}

/// Handler for the backup export.
///
/// Orders are exported as raw JSON values rather than typed records so
/// old entries written by earlier versions survive the round trip.
pub struct ExportBackupHandler {
    kv: Arc<dyn KvStore>,
    cancelled: CancelledAdsRepo,
    edits: EditedAdsRepo,
}

impl ExportBackupHandler {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            cancelled: CancelledAdsRepo::new(kv.clone()),
            edits: EditedAdsRepo::new(kv.clone()),
            kv,
        }
    }

    pub async fn handle(&self) -> Result<BackupDocument, KvError> {
        let mut completed_orders = Vec::new();
        for key in self.kv.list_keys(COMPLETED_KEY_PREFIX).await? {
            let Some(raw) = self.kv.get(&key).await? else {
                continue;
            };
            let order = serde_json::from_str(&raw).map_err(|e| KvError::Corrupt {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            completed_orders.push(order);
        }

        Ok(BackupDocument {
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            completed_orders,
            cancelled_ads: self.cancelled.load().await?,
            edited_ads: self.edits.load().await?,
            site_config: load_site_config(self.kv.as_ref()).await,
        })
    }

    /// Attachment filename for today's export
    pub fn filename(&self) -> String {
        format!("adboard-backup-{}.json", Utc::now().format("%Y-%m-%d"))
    }
}
