//! SendReportHandler - emails performance results to an advertiser.

use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::kv::SentReportsRepo;
use crate::adapters::resend::templates::{self, ReportInput};
use crate::config::EmailConfig;
use crate::domain::ad::{AdId, AdType, SentReport};
use crate::ports::{KvError, KvStore, MailError, Mailer, OutboundEmail};

/// Errors from report sending
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Mail(#[from] MailError),

    #[error(transparent)]
    Storage(#[from] KvError),
}

/// Command to send one performance report
#[derive(Debug, Clone)]
pub struct SendReportCommand {
    pub ad_id: AdId,
    pub customer_name: String,
    pub customer_email: String,
    pub issue_number: String,
    pub date_formatted: String,
    pub ad_type: AdType,
    pub clicks: i64,
    pub open_rate: f64,
}

/// Handler for performance reports.
///
/// The email goes out first; only a successful send marks the ad in
/// `sent_reports`. A failed mark leaves the report resendable, which
/// beats marking an email that never arrived.
pub struct SendReportHandler {
    mailer: Arc<dyn Mailer>,
    reports: SentReportsRepo,
    email: EmailConfig,
}

impl SendReportHandler {
    pub fn new(mailer: Arc<dyn Mailer>, kv: Arc<dyn KvStore>, email: EmailConfig) -> Self {
        Self {
            mailer,
            reports: SentReportsRepo::new(kv),
            email,
        }
    }

    pub async fn handle(&self, cmd: SendReportCommand) -> Result<(), ReportError> {
        let html = templates::performance_report(&ReportInput {
            customer_name: cmd.customer_name.clone(),
            issue_number: cmd.issue_number.clone(),
            date_formatted: cmd.date_formatted.clone(),
            ad_type: cmd.ad_type,
            clicks: cmd.clicks,
            open_rate: cmd.open_rate,
        });

        self.mailer
            .send(OutboundEmail {
                from: self.email.from_header(),
                to: cmd.customer_email.clone(),
                reply_to: Some(self.email.notification_email.clone()),
                subject: format!(
                    "Your Ad Results: {} clicks - Issue #{}",
                    cmd.clicks, cmd.issue_number
                ),
                html,
            })
            .await?;

        self.reports
            .mark_sent(
                cmd.ad_id.clone(),
                SentReport {
                    clicks: cmd.clicks,
                    open_rate: cmd.open_rate,
                    customer_email: cmd.customer_email,
                    sent_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                },
            )
            .await?;

        tracing::info!(ad_id = %cmd.ad_id, clicks = cmd.clicks, "performance report sent");
        Ok(())
    }
}
