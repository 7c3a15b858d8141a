//! Checkout session summaries as reported by the payment processor

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payment status of a checkout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Only sessions that actually collected money count for revenue
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

/// A checkout session as returned by the sessions list endpoint and
/// inside `checkout.session.completed` webhook events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session ID (cs_...)
    pub id: String,

    pub payment_status: PaymentStatus,

    /// Unix creation timestamp
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub customer_email: Option<String>,

    /// Total charged, in minor currency units
    #[serde(default)]
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub payment_intent: Option<String>,

    /// Free-form metadata attached at session creation
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl SessionSummary {
    /// Look up a metadata value, treating absence as empty
    pub fn meta(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }

    /// Revenue attributed to this session, in whole currency units
    pub fn revenue(&self) -> i64 {
        self.amount_total.unwrap_or(0) / 100
    }
}
