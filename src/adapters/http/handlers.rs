//! HTTP handlers for the booking API.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. Admin endpoints require a bearer token; the webhook endpoint
//! is authenticated by signature instead.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{
    CancelAdHandler, CheckoutError, CreateCheckoutCommand, CreateCheckoutHandler, EditAdCommand,
    EditAdHandler, ExportBackupHandler, GetInventoryHandler, GetOrdersHandler,
    GetSiteConfigHandler, ProcessWebhookCommand, ProcessWebhookHandler, SendReportHandler,
    UpdateSiteConfigHandler,
};
use crate::config::{EmailConfig, PaymentConfig};
use crate::domain::site_config::SiteConfig;
use crate::domain::webhook::WebhookVerifier;
use crate::ports::{CheckoutGateway, KvStore, Mailer};

use super::dto::{
    CancelAdRequest, CheckoutResponse, CreateCheckoutRequest, EditAdRequest, ErrorResponse,
    SendReportRequest, SuccessResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; everything heavyweight is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KvStore>,
    pub gateway: Arc<dyn CheckoutGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub verifier: Arc<WebhookVerifier>,
    pub payment: PaymentConfig,
    pub email: EmailConfig,
    pub admin_token: String,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.gateway.clone(), self.kv.clone(), self.payment.clone())
    }

    pub fn webhook_handler(&self) -> ProcessWebhookHandler {
        ProcessWebhookHandler::new(
            self.verifier.clone(),
            self.kv.clone(),
            self.mailer.clone(),
            self.email.clone(),
        )
    }

    pub fn orders_handler(&self) -> GetOrdersHandler {
        GetOrdersHandler::new(self.gateway.clone(), self.kv.clone())
    }

    pub fn inventory_handler(&self) -> GetInventoryHandler {
        GetInventoryHandler::new(self.gateway.clone(), self.kv.clone())
    }

    pub fn cancel_ad_handler(&self) -> CancelAdHandler {
        CancelAdHandler::new(self.kv.clone())
    }

    pub fn edit_ad_handler(&self) -> EditAdHandler {
        EditAdHandler::new(self.kv.clone())
    }

    pub fn send_report_handler(&self) -> SendReportHandler {
        SendReportHandler::new(self.mailer.clone(), self.kv.clone(), self.email.clone())
    }

    pub fn backup_handler(&self) -> ExportBackupHandler {
        ExportBackupHandler::new(self.kv.clone())
    }

    pub fn get_site_config_handler(&self) -> GetSiteConfigHandler {
        GetSiteConfigHandler::new(self.kv.clone())
    }

    pub fn update_site_config_handler(&self) -> UpdateSiteConfigHandler {
        UpdateSiteConfigHandler::new(self.kv.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error carrying the HTTP status and the public message.
///
/// Internal detail goes to the log at the point of failure, never into
/// the response body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Authorization
// ════════════════════════════════════════════════════════════════════════════════

/// Check the `Authorization: Bearer <token>` header on admin endpoints.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if !state.admin_token.is_empty() && token == state.admin_token => Ok(()),
        _ => Err(ApiError::unauthorized()),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Public Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create-checkout - Open a Stripe checkout session for a booking
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        order: request.into(),
    };

    let result = handler.handle(cmd).await.map_err(|err| match err {
        CheckoutError::Validation(message) => ApiError::bad_request(message),
        CheckoutError::Gateway(err) => {
            tracing::error!(error = %err, "checkout session creation failed");
            ApiError::internal("Failed to create checkout session")
        }
    })?;

    Ok(Json(CheckoutResponse::from(result)))
}

/// POST /webhook - Handle Stripe webhook deliveries
///
/// Responds in plain text the way Stripe expects. Anything that goes
/// wrong after the signature check is logged and still acknowledged,
/// so Stripe does not retry an event we already acted on.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let Some(signature) = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
    else {
        return (StatusCode::BAD_REQUEST, "Invalid signature").into_response();
    };

    let handler = state.webhook_handler();
    let cmd = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature_header: signature.to_string(),
    };

    match handler.handle(cmd).await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected");
            (StatusCode::BAD_REQUEST, "Invalid signature").into_response()
        }
    }
}

/// GET /inventory - Booked-slot counts per issue
pub async fn get_inventory(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.inventory_handler().handle().await)
}

/// GET /config - Public site configuration
pub async fn get_site_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.get_site_config_handler().handle().await)
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /admin/orders - Reconciled order dashboard
pub async fn admin_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    let reconciled = state.orders_handler().handle().await.map_err(|err| {
        tracing::error!(error = %err, "order reconciliation failed");
        ApiError::internal("Failed to fetch orders")
    })?;

    Ok(Json(reconciled))
}

/// POST /admin/delete - Cancel an ad
pub async fn admin_delete_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CancelAdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    if request.ad_id.as_str().is_empty() {
        return Err(ApiError::bad_request("Missing adId"));
    }

    state
        .cancel_ad_handler()
        .handle(request.ad_id)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "ad cancellation failed");
            ApiError::internal("Failed to delete ad")
        })?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /admin/edit - Override an ad's copy and link
pub async fn admin_edit_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<EditAdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    if request.ad_id.as_str().is_empty() || request.ad_copy.is_empty() || request.ad_url.is_empty()
    {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let cmd = EditAdCommand {
        ad_id: request.ad_id,
        ad_copy: request.ad_copy,
        ad_url: request.ad_url,
        notes: request.notes,
    };

    state.edit_ad_handler().handle(cmd).await.map_err(|err| {
        tracing::error!(error = %err, "ad edit failed");
        ApiError::internal("Failed to edit ad")
    })?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /admin/edits - Dump the edit overlay (debugging aid)
pub async fn admin_list_edits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    let edits = state.edit_ad_handler().list().await.map_err(|err| {
        tracing::error!(error = %err, "edit list failed");
        ApiError::internal("Failed to fetch edits")
    })?;

    Ok(Json(edits))
}

/// POST /admin/send-report - Email a performance report
pub async fn admin_send_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SendReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    if request.ad_id.as_str().is_empty()
        || request.customer_email.is_empty()
        || request.clicks == 0
    {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    state
        .send_report_handler()
        .handle(request.into())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "report send failed");
            ApiError::internal("Failed to send report")
        })?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /admin/backup - One-file JSON export of all stored state
pub async fn admin_backup(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    let handler = state.backup_handler();
    let backup = handler.handle().await.map_err(|err| {
        tracing::error!(error = %err, "backup export failed");
        ApiError::internal("Failed to create backup")
    })?;

    let disposition = format!("attachment; filename=\"{}\"", handler.filename());
    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(backup),
    ))
}

/// POST|PUT /admin/config - Replace the site configuration
pub async fn admin_update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &headers)?;

    // Reject documents missing stats or testimonials outright rather
    // than persisting something the public page cannot render.
    let config: SiteConfig = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid config format"))?;

    state
        .update_site_config_handler()
        .handle(config)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "config update failed");
            ApiError::internal("Failed to update config")
        })?;

    Ok(Json(SuccessResponse::ok()))
}
