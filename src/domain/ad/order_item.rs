//! Order items and the full booking order

use serde::{Deserialize, Serialize};

/// The kind of ad slot a customer booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Premium,
    #[default]
    Unclassified,
    /// Synthesized when order data could not be parsed
    #[serde(other)]
    Unknown,
}

impl AdType {
    pub fn label(&self) -> &'static str {
        match self {
            AdType::Premium => "premium",
            AdType::Unclassified => "unclassified",
            AdType::Unknown => "unknown",
        }
    }
}

/// One ad slot within a booking, as stored in checkout metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    /// Slot type; absent values read as unclassified
    #[serde(rename = "type")]
    pub ad_type: AdType,

    /// Newsletter issue number, e.g. "12"
    pub issue_number: String,

    /// Human-readable issue date, e.g. "Jan 1, 2099"
    pub date_formatted: String,

    /// ISO issue date, e.g. "2099-01-01"
    pub date_str: String,

    /// Legacy date field kept for orders booked before `dateStr` existed
    pub date: String,

    pub ad_copy: String,
    pub ad_url: String,

    /// Price in whole currency units
    pub price: i64,
}

impl OrderItem {
    /// The issue date used for upcoming/past partitioning
    pub fn issue_date(&self) -> &str {
        if !self.date_str.is_empty() {
            &self.date_str
        } else {
            &self.date
        }
    }
}

/// A complete booking as submitted at checkout and cached in KV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingOrder {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    pub items: Vec<OrderItem>,
}

impl BookingOrder {
    /// Sum of the per-item prices, in whole currency units
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.price).sum()
    }
}

/// The durable record written once a checkout session completes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    #[serde(flatten)]
    pub order: BookingOrder,

    pub session_id: String,

    #[serde(default)]
    pub payment_intent: Option<String>,

    /// Amount charged, in minor currency units as Stripe reports it
    #[serde(default)]
    pub amount_total: Option<i64>,

    /// RFC 3339 completion time
    pub completed_at: String,
}
