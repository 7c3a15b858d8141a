//! Override documents layered onto reconciled orders
//!
//! The payment processor is the source of truth for what was bought;
//! these three KV-stored documents record everything that happened to an
//! ad after purchase. Each is keyed by [`AdId`](super::AdId) and applied
//! during reconciliation instead of mutating any order record.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::ad_id::AdId;

/// Set of cancelled ad IDs (the `cancelled_ads` document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CancelledAds(BTreeSet<AdId>);

impl CancelledAds {
    pub fn contains(&self, ad_id: &AdId) -> bool {
        self.0.contains(ad_id)
    }

    /// Add an ad to the cancelled set; returns false if already present
    pub fn insert(&mut self, ad_id: AdId) -> bool {
        self.0.insert(ad_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AdId> for CancelledAds {
    fn from_iter<T: IntoIterator<Item = AdId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Admin-supplied replacement content for one ad
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdEdit {
    pub ad_copy: String,
    pub ad_url: String,
    #[serde(default)]
    pub notes: String,
    /// RFC 3339 time of the last edit
    #[serde(default)]
    pub edited_at: String,
}

/// Map of ad ID to its latest edit (the `edited_ads` document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditedAds(BTreeMap<AdId, AdEdit>);

impl EditedAds {
    pub fn get(&self, ad_id: &AdId) -> Option<&AdEdit> {
        self.0.get(ad_id)
    }

    /// Insert or replace the edit for an ad
    pub fn upsert(&mut self, ad_id: AdId, edit: AdEdit) {
        self.0.insert(ad_id, edit);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Performance numbers included in a sent report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentReport {
    pub clicks: i64,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub customer_email: String,
    /// RFC 3339 time the report email went out
    #[serde(default)]
    pub sent_at: String,
}

/// Map of ad ID to its delivered report (the `sent_reports` document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentReports(BTreeMap<AdId, SentReport>);

impl SentReports {
    pub fn get(&self, ad_id: &AdId) -> Option<&SentReport> {
        self.0.get(ad_id)
    }

    pub fn mark_sent(&mut self, ad_id: AdId, report: SentReport) {
        self.0.insert(ad_id, report);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_ads_round_trips_as_json_array() {
        let mut cancelled = CancelledAds::default();
        assert!(cancelled.insert(AdId::from_raw("cs_1_0_2099-01-01")));
        assert!(!cancelled.insert(AdId::from_raw("cs_1_0_2099-01-01")));

        let json = serde_json::to_string(&cancelled).unwrap();
        assert_eq!(json, r#"["cs_1_0_2099-01-01"]"#);

        let parsed: CancelledAds = serde_json::from_str(&json).unwrap();
        assert!(parsed.contains(&AdId::from_raw("cs_1_0_2099-01-01")));
    }

    #[test]
    fn test_edited_ads_round_trips_as_json_object() {
        let mut edits = EditedAds::default();
        edits.upsert(
            AdId::from_raw("cs_1_0_12"),
            AdEdit {
                ad_copy: "Updated copy".to_string(),
                ad_url: "https://example.com".to_string(),
                notes: "fixed typo".to_string(),
                edited_at: "2026-01-01T00:00:00Z".to_string(),
            },
        );

        let json = serde_json::to_value(&edits).unwrap();
        assert_eq!(json["cs_1_0_12"]["adCopy"], "Updated copy");
        assert_eq!(json["cs_1_0_12"]["editedAt"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_upsert_replaces_previous_edit() {
        let id = AdId::from_raw("cs_1_0_12");
        let mut edits = EditedAds::default();
        edits.upsert(id.clone(), AdEdit::default());
        edits.upsert(
            id.clone(),
            AdEdit {
                ad_copy: "second".to_string(),
                ..Default::default()
            },
        );

        assert_eq!(edits.len(), 1);
        assert_eq!(edits.get(&id).unwrap().ad_copy, "second");
    }

    #[test]
    fn test_sent_reports_parse_legacy_document() {
        let reports: SentReports = serde_json::from_str(
            r#"{"cs_1_0_12": {"clicks": 42, "openRate": 46.5, "customerEmail": "a@b.c", "sentAt": ""}}"#,
        )
        .unwrap();
        let report = reports.get(&AdId::from_raw("cs_1_0_12")).unwrap();
        assert_eq!(report.clicks, 42);
        assert_eq!(report.open_rate, 46.5);
    }
}
