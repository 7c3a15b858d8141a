//! Order reconciliation
//!
//! The payment processor's session list is the source of truth for what
//! was bought. Reconciliation merges it with the three override
//! documents into the admin orders view, and projects the same data
//! into per-issue sold inventory for the public booking page. Both
//! functions are pure: given the same sessions, overrides and date they
//! produce identical output, and neither ever writes anywhere.

use chrono::{DateTime, NaiveDate, SecondsFormat};
use serde::Serialize;
use std::collections::BTreeMap;

use super::ad_id::AdId;
use super::order_item::{AdType, OrderItem};
use super::overrides::{CancelledAds, EditedAds, SentReports};
use super::record::{AdRecord, OrderStats, ReconciledOrders};
use super::session::SessionSummary;

/// Sold-slot summary for one newsletter issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueInventory {
    /// Whether the single premium slot is taken
    pub premium: bool,
    /// Number of unclassified slots sold
    pub unclassified: u32,
}

/// Build the admin orders view from fetched sessions and overrides.
///
/// `today` partitions ads into upcoming and past; records without a
/// parseable issue date stay upcoming so they surface for manual review
/// rather than silently aging out.
pub fn reconcile(
    sessions: &[SessionSummary],
    cancelled: &CancelledAds,
    edits: &EditedAds,
    reports: &SentReports,
    today: NaiveDate,
) -> ReconciledOrders {
    let mut upcoming = Vec::new();
    let mut past: Vec<(NaiveDate, AdRecord)> = Vec::new();
    let mut total_revenue = 0;

    for session in sessions {
        if !session.payment_status.is_paid() {
            continue;
        }
        // Revenue is session-level: counted once per paid session, never
        // re-derived from per-item prices.
        total_revenue += session.revenue();

        for (index, item) in expand_items(session).iter().enumerate() {
            let ad_id = AdId::derive(&session.id, index, item);
            if cancelled.contains(&ad_id) {
                continue;
            }

            let record = build_record(session, item, ad_id, edits, reports);
            match parse_issue_date(&record.issue_date) {
                Some(date) if date < today => past.push((date, record)),
                _ => upcoming.push(record),
            }
        }
    }

    past.sort_by(|a, b| b.0.cmp(&a.0));

    let stats = OrderStats {
        total_orders: sessions.len(),
        total_revenue,
        upcoming_ads: upcoming.len(),
        past_ads: past.len(),
    };

    ReconciledOrders {
        orders: upcoming,
        past_orders: past.into_iter().map(|(_, record)| record).collect(),
        stats,
    }
}

/// Project sold inventory per issue number.
///
/// Applies the same cancellation filter as [`reconcile`], but sessions
/// whose order data cannot be parsed are skipped outright; a placeholder
/// with issue `?` would only pollute the availability view.
pub fn project_inventory(
    sessions: &[SessionSummary],
    cancelled: &CancelledAds,
) -> BTreeMap<String, IssueInventory> {
    let mut inventory: BTreeMap<String, IssueInventory> = BTreeMap::new();

    for session in sessions {
        if !session.payment_status.is_paid() {
            continue;
        }
        let Some(items) = parse_items_strict(session) else {
            continue;
        };

        for (index, item) in items.iter().enumerate() {
            let ad_id = AdId::derive(&session.id, index, item);
            if cancelled.contains(&ad_id) {
                continue;
            }
            if item.issue_number.is_empty() || item.issue_number == "?" {
                continue;
            }

            let entry = inventory.entry(item.issue_number.clone()).or_default();
            match item.ad_type {
                AdType::Premium => entry.premium = true,
                _ => entry.unclassified += 1,
            }
        }
    }

    inventory
}

/// Expand a session's metadata into order items.
///
/// Falls back to a single placeholder item built from `order_summary`
/// when `order_data` is present but unparseable, so the booking still
/// shows up in the admin view. Missing `order_data` with no summary
/// yields no items.
fn expand_items(session: &SessionSummary) -> Vec<OrderItem> {
    match parse_items_strict(session) {
        Some(items) => items,
        None => {
            let summary = session.meta("order_summary");
            if summary.is_empty() {
                return Vec::new();
            }
            vec![OrderItem {
                ad_type: AdType::Unknown,
                issue_number: "?".to_string(),
                date_formatted: summary.to_string(),
                ad_copy: "See email for details".to_string(),
                price: session.revenue(),
                ..Default::default()
            }]
        }
    }
}

/// Parse `order_data` exactly; absence reads as an empty list
fn parse_items_strict(session: &SessionSummary) -> Option<Vec<OrderItem>> {
    let raw = session.meta("order_data");
    if raw.is_empty() {
        return Some(Vec::new());
    }
    serde_json::from_str(raw).ok()
}

fn build_record(
    session: &SessionSummary,
    item: &OrderItem,
    ad_id: AdId,
    edits: &EditedAds,
    reports: &SentReports,
) -> AdRecord {
    let edit = edits.get(&ad_id);
    let report = reports.get(&ad_id);

    let customer_name = match session.meta("customer_name") {
        "" => "Unknown".to_string(),
        name => name.to_string(),
    };
    let customer_email = match session.meta("customer_email") {
        "" => session.customer_email.clone().unwrap_or_default(),
        email => email.to_string(),
    };
    let issue_number = match item.issue_number.as_str() {
        "" => "?".to_string(),
        number => number.to_string(),
    };

    AdRecord {
        session_id: session.id.clone(),
        customer_name,
        customer_email,
        company: session.meta("company").to_string(),
        ad_type: item.ad_type,
        issue_number,
        date_formatted: item.date_formatted.clone(),
        issue_date: item.issue_date().to_string(),
        ad_copy: edit.map_or_else(|| item.ad_copy.clone(), |e| e.ad_copy.clone()),
        ad_url: edit.map_or_else(|| item.ad_url.clone(), |e| e.ad_url.clone()),
        notes: edit.map_or_else(String::new, |e| e.notes.clone()),
        price: item.price,
        paid_at: format_paid_at(session.created),
        edited: edit.is_some(),
        report_sent: report.is_some(),
        report_data: report.cloned(),
        ad_id,
    }
}

fn parse_issue_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn format_paid_at(created: i64) -> String {
    DateTime::from_timestamp(created, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
