//! Repositories for the override documents
//!
//! Each document lives under one fixed KV key as a JSON blob. Updates
//! are read-modify-write; with a single administrator the lost-update
//! window between two concurrent writes is accepted rather than closed
//! (the `KvStore` port has no conditional write).

use std::sync::Arc;

use crate::domain::ad::{AdEdit, AdId, CancelledAds, EditedAds, SentReport, SentReports};
use crate::ports::{KvError, KvStore};

pub const CANCELLED_ADS_KEY: &str = "cancelled_ads";
pub const EDITED_ADS_KEY: &str = "edited_ads";
pub const SENT_REPORTS_KEY: &str = "sent_reports";

fn decode<T: serde::de::DeserializeOwned + Default>(
    key: &str,
    stored: Option<String>,
) -> Result<T, KvError> {
    match stored {
        None => Ok(T::default()),
        Some(json) => serde_json::from_str(&json).map_err(|e| KvError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, KvError> {
    serde_json::to_string(value).map_err(|e| KvError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// The `cancelled_ads` document: a JSON array of ad IDs
#[derive(Clone)]
pub struct CancelledAdsRepo {
    store: Arc<dyn KvStore>,
}

impl CancelledAdsRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<CancelledAds, KvError> {
        decode(CANCELLED_ADS_KEY, self.store.get(CANCELLED_ADS_KEY).await?)
    }

    /// Add an ad to the cancelled set; returns false if it was already
    /// cancelled (the write is skipped in that case).
    pub async fn add(&self, ad_id: AdId) -> Result<bool, KvError> {
        let mut cancelled = self.load().await?;
        if !cancelled.insert(ad_id) {
            return Ok(false);
        }
        let json = encode(CANCELLED_ADS_KEY, &cancelled)?;
        self.store.put(CANCELLED_ADS_KEY, json).await?;
        Ok(true)
    }
}

/// The `edited_ads` document: a JSON object keyed by ad ID
#[derive(Clone)]
pub struct EditedAdsRepo {
    store: Arc<dyn KvStore>,
}

impl EditedAdsRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<EditedAds, KvError> {
        decode(EDITED_ADS_KEY, self.store.get(EDITED_ADS_KEY).await?)
    }

    /// Insert or replace the edit for an ad
    pub async fn upsert(&self, ad_id: AdId, edit: AdEdit) -> Result<(), KvError> {
        let mut edits = self.load().await?;
        edits.upsert(ad_id, edit);
        let json = encode(EDITED_ADS_KEY, &edits)?;
        self.store.put(EDITED_ADS_KEY, json).await
    }
}

/// The `sent_reports` document: a JSON object keyed by ad ID
#[derive(Clone)]
pub struct SentReportsRepo {
    store: Arc<dyn KvStore>,
}

impl SentReportsRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<SentReports, KvError> {
        decode(SENT_REPORTS_KEY, self.store.get(SENT_REPORTS_KEY).await?)
    }

    pub async fn mark_sent(&self, ad_id: AdId, report: SentReport) -> Result<(), KvError> {
        let mut reports = self.load().await?;
        reports.mark_sent(ad_id, report);
        let json = encode(SENT_REPORTS_KEY, &reports)?;
        self.store.put(SENT_REPORTS_KEY, json).await
    }
}
