//! Resend mailer adapter

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{MailError, Mailer, OutboundEmail};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resend implementation of [`Mailer`]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: SecretString,
    api_base_url: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    pub fn new(config: &EmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: SecretString::new(config.resend_api_key.clone()),
            api_base_url: config.api_base_url.clone(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let request = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status, %message, "email send failed");
            return Err(MailError::Api { status, message });
        }

        Ok(())
    }
}
