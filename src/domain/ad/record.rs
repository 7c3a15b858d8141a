//! Reconciled ad records and the admin orders view

use serde::Serialize;

use super::ad_id::AdId;
use super::order_item::AdType;
use super::overrides::SentReport;

/// One fully-reconciled ad as shown in the admin dashboard
///
/// Field names on the wire are fixed by the existing admin UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    pub ad_id: AdId,
    pub session_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub company: String,
    #[serde(rename = "type")]
    pub ad_type: AdType,
    pub issue_number: String,
    pub date_formatted: String,
    /// ISO issue date; empty when the booking never carried one
    pub issue_date: String,
    pub ad_copy: String,
    pub ad_url: String,
    pub notes: String,
    /// Item price in whole currency units
    pub price: i64,
    /// RFC 3339 time the session was created
    pub paid_at: String,
    pub edited: bool,
    pub report_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_data: Option<SentReport>,
}

/// Aggregate counters for the admin orders view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    /// All fetched sessions, paid or not
    pub total_orders: usize,
    /// Whole currency units, summed once per paid session
    pub total_revenue: i64,
    pub upcoming_ads: usize,
    pub past_ads: usize,
}

/// The complete reconciliation output
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledOrders {
    /// Upcoming ads, in session fetch order
    pub orders: Vec<AdRecord>,
    /// Past ads, newest issue date first
    pub past_orders: Vec<AdRecord>,
    pub stats: OrderStats,
}
