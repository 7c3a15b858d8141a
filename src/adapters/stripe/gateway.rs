//! Stripe checkout gateway adapter
//!
//! Talks to the Stripe REST API directly with `reqwest`: checkout
//! session creation uses form-encoded bracket-notation parameters
//! (`line_items[0][price]=...`), listing uses plain query parameters.
//! The secret key rides in HTTP basic auth as Stripe documents.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::config::PaymentConfig;
use crate::domain::ad::SessionSummary;
use crate::ports::{
    CheckoutGateway, CreateSessionRequest, CreatedSession, GatewayError,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stripe implementation of [`CheckoutGateway`]
pub struct StripeGateway {
    client: reqwest::Client,
    api_key: SecretString,
    api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionListResponse {
    data: Vec<SessionSummary>,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: SecretString::new(config.stripe_api_key.clone()),
            api_base_url: config.api_base_url.clone(),
        }
    }

    async fn read_error(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        GatewayError::Api { status, message }
    }
}

/// Flatten a create-session request into Stripe's bracket-notation
/// form parameters, preserving insertion order.
fn encode_params(request: &CreateSessionRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        ("customer_email".to_string(), request.customer_email.clone()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (index, item) in request.line_items.iter().enumerate() {
        params.push((
            format!("line_items[{index}][price]"),
            item.price_id.clone(),
        ));
        params.push((
            format!("line_items[{index}][quantity]"),
            item.quantity.to_string(),
        ));
    }

    for (key, value) in &request.metadata {
        params.push((format!("metadata[{key}]"), value.clone()));
    }

    for (key, value) in &request.payment_metadata {
        params.push((
            format!("payment_intent_data[metadata][{key}]"),
            value.clone(),
        ));
    }

    params
}

#[async_trait]
impl CheckoutGateway for StripeGateway {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreatedSession, GatewayError> {
        let params = encode_params(&request);

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base_url))
            .basic_auth(self.api_key.expose_secret(), None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::read_error(response).await;
            tracing::warn!(error = %err, "stripe session creation failed");
            return Err(err);
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let url = session.url.ok_or_else(|| {
            GatewayError::InvalidResponse("session has no redirect url".to_string())
        })?;

        Ok(CreatedSession {
            id: session.id,
            url,
        })
    }

    async fn list_completed_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<SessionSummary>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/v1/checkout/sessions", self.api_base_url))
            .basic_auth(self.api_key.expose_secret(), None::<&str>)
            .query(&[("limit", limit.to_string()), ("status", "complete".to_string())])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::read_error(response).await;
            tracing::warn!(error = %err, "stripe session listing failed");
            return Err(err);
        }

        let list: SessionListResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(list.data)
    }
}
