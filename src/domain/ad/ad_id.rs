//! Stable identifier for a single booked ad slot

use serde::{Deserialize, Serialize};
use std::fmt;

use super::order_item::OrderItem;

/// Identifies one ad slot within a checkout session.
///
/// The ID is derived, not stored: `{sessionId}_{itemIndex}_{dateStr}`,
/// falling back to the issue number when the item has no date string.
/// Because it is recomputed the same way on every reconciliation pass,
/// the override documents (cancellations, edits, sent reports) can key
/// on it without any extra bookkeeping at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdId(String);

impl AdId {
    /// Derive the ID for the item at `index` within `session_id`.
    ///
    /// This is the only way an ID is ever constructed from order data;
    /// every consumer derives it identically.
    pub fn derive(session_id: &str, index: usize, item: &OrderItem) -> Self {
        let discriminator = if item.date_str.is_empty() {
            item.issue_number.as_str()
        } else {
            item.date_str.as_str()
        };
        Self(format!("{session_id}_{index}_{discriminator}"))
    }

    /// Wrap an ID received over the wire (admin requests)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(date_str: &str, issue_number: &str) -> OrderItem {
        OrderItem {
            date_str: date_str.to_string(),
            issue_number: issue_number.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_uses_date_str() {
        let id = AdId::derive("sess_1", 0, &item("2099-01-01", "12"));
        assert_eq!(id.as_str(), "sess_1_0_2099-01-01");
    }

    #[test]
    fn test_derive_falls_back_to_issue_number() {
        let id = AdId::derive("sess_1", 2, &item("", "12"));
        assert_eq!(id.as_str(), "sess_1_2_12");
    }

    #[test]
    fn test_derive_with_neither_still_total() {
        let id = AdId::derive("sess_1", 0, &item("", ""));
        assert_eq!(id.as_str(), "sess_1_0_");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = AdId::from_raw("sess_1_0_2099-01-01");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"sess_1_0_2099-01-01\""
        );
    }

    proptest! {
        #[test]
        fn prop_derivation_is_deterministic(
            session in "cs_[a-z0-9]{1,12}",
            index in 0usize..10,
            date in "[0-9-]{0,10}",
            issue in "[0-9?]{0,3}",
        ) {
            let item = item(&date, &issue);
            prop_assert_eq!(
                AdId::derive(&session, index, &item),
                AdId::derive(&session, index, &item)
            );
        }
    }
}
