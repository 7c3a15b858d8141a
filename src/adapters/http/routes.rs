//! Axum router configuration for the booking API.
//!
//! This module defines the route structure and wires routes to their
//! corresponding handlers.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{
    admin_backup, admin_delete_ad, admin_edit_ad, admin_list_edits, admin_orders,
    admin_send_report, admin_update_config, create_checkout, get_inventory, get_site_config,
    stripe_webhook, AppState,
};

/// Create the admin API router.
///
/// Every route checks the `Authorization: Bearer` admin token.
///
/// # Routes
/// - `GET /orders` - Reconciled order dashboard
/// - `POST /delete` - Cancel an ad
/// - `POST /edit` - Override an ad's copy and link
/// - `GET /edits` - Dump the edit overlay
/// - `POST /send-report` - Email a performance report
/// - `GET /backup` - One-file JSON export
/// - `GET|PUT|POST /config` - Read or replace the site configuration
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin_orders))
        .route("/delete", post(admin_delete_ad))
        .route("/edit", post(admin_edit_ad))
        .route("/edits", get(admin_list_edits))
        .route("/send-report", post(admin_send_report))
        .route("/backup", get(admin_backup))
        .route(
            "/config",
            get(get_site_config)
                .put(admin_update_config)
                .post(admin_update_config),
        )
}

/// Create the complete API router.
///
/// # Routes
/// - `POST /create-checkout` - Open a checkout session (public)
/// - `POST /webhook` - Stripe webhook deliveries (signature verified)
/// - `GET /inventory` - Booked-slot counts per issue (public)
/// - `GET /config` - Public site configuration
/// - `/admin/*` - Admin endpoints, see [`admin_routes`]
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/create-checkout", post(create_checkout))
        .route("/webhook", post(stripe_webhook))
        .route("/inventory", get(get_inventory))
        .route("/config", get(get_site_config))
        .nest("/admin", admin_routes())
        .layer(cors_layer())
}

/// CORS policy: the booking page is served from a different origin than
/// this API, so preflights must pass for every route.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use tower::ServiceExt;

    use crate::adapters::kv::InMemoryKvStore;
    use crate::config::{EmailConfig, PaymentConfig};
    use crate::domain::ad::{PaymentStatus, SessionSummary};
    use crate::domain::webhook::WebhookVerifier;
    use crate::ports::{
        CheckoutGateway, CreateSessionRequest, CreatedSession, GatewayError, KvStore, MailError,
        Mailer, OutboundEmail,
    };
    use async_trait::async_trait;

    // ───────────────────────────────────────────────────────────────
    // Mocks
    // ───────────────────────────────────────────────────────────────

    struct MockGateway {
        sessions: Vec<SessionSummary>,
    }

    #[async_trait]
    impl CheckoutGateway for MockGateway {
        async fn create_session(
            &self,
            _request: CreateSessionRequest,
        ) -> Result<CreatedSession, GatewayError> {
            Ok(CreatedSession {
                id: "cs_test_1".to_string(),
                url: "https://checkout.stripe.com/c/pay/cs_test_1".to_string(),
            })
        }

        async fn list_completed_sessions(
            &self,
            _limit: u32,
        ) -> Result<Vec<SessionSummary>, GatewayError> {
            Ok(self.sessions.clone())
        }
    }

    struct MockMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    const TEST_SECRET: &str = "whsec_test_secret";
    const ADMIN_TOKEN: &str = "test-admin-token";

    fn test_state(kv: Arc<InMemoryKvStore>, sessions: Vec<SessionSummary>) -> AppState {
        AppState {
            kv,
            gateway: Arc::new(MockGateway { sessions }),
            mailer: Arc::new(MockMailer {
                sent: Mutex::new(Vec::new()),
            }),
            verifier: Arc::new(WebhookVerifier::new(TEST_SECRET)),
            payment: PaymentConfig {
                premium_price_id: "price_premium".to_string(),
                unclassified_price_id: "price_unclassified".to_string(),
                success_url: "https://ads.example.com/success".to_string(),
                cancel_url: "https://ads.example.com/book".to_string(),
                ..Default::default()
            },
            email: EmailConfig {
                notification_email: "team@adboard.dev".to_string(),
                ..Default::default()
            },
            admin_token: ADMIN_TOKEN.to_string(),
        }
    }

    fn app(kv: Arc<InMemoryKvStore>, sessions: Vec<SessionSummary>) -> Router {
        api_router().with_state(test_state(kv, sessions))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn admin_get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::empty())
            .unwrap()
    }

    fn admin_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn paid_session(id: &str, order_data: &str) -> SessionSummary {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("customer_name".to_string(), "Jane".to_string());
        metadata.insert("customer_email".to_string(), "jane@example.com".to_string());
        metadata.insert("order_data".to_string(), order_data.to_string());
        SessionSummary {
            id: id.to_string(),
            payment_status: PaymentStatus::Paid,
            created: 1_700_000_000,
            customer_email: Some("jane@example.com".to_string()),
            amount_total: Some(50_000),
            payment_intent: Some("pi_1".to_string()),
            metadata,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_checkout_returns_checkout_url() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(json_post(
                "/create-checkout",
                r#"{
                    "name": "Jane",
                    "email": "jane@example.com",
                    "items": [
                        {"type": "premium", "issueNumber": "12", "adCopy": "Hi", "adUrl": "https://x.co", "price": 500}
                    ]
                }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["checkoutUrl"],
            "https://checkout.stripe.com/c/pay/cs_test_1"
        );
    }

    #[tokio::test]
    async fn create_checkout_rejects_empty_booking() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(json_post(
                "/create-checkout",
                r#"{"name": "Jane", "email": "jane@example.com", "items": []}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn webhook_rejects_missing_signature() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(json_post("/webhook", r#"{"type": "checkout.session.completed"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_rejects_bad_signature() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("stripe-signature", "t=1700000000,v1=deadbeef")
            .body(Body::from(r#"{"type": "checkout.session.completed"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_acknowledges_valid_signature() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);
        let verifier = WebhookVerifier::new(TEST_SECRET);

        let payload = r#"{"id": "evt_1", "type": "payment_intent.created", "data": {"object": {}}}"#;
        let timestamp = Utc::now().timestamp();
        let signature = verifier.sign(timestamp, payload.as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("stripe-signature", format!("t={timestamp},v1={signature}"))
            .body(Body::from(payload))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn inventory_is_public() {
        let sessions = vec![paid_session(
            "cs_1",
            r#"[{"type":"premium","issueNumber":"10","adCopy":"Hi","adUrl":"https://x.co","price":500}]"#,
        )];
        let app = app(Arc::new(InMemoryKvStore::new()), sessions);

        let response = app
            .oneshot(Request::builder().uri("/inventory").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["10"]["premium"], true);
    }

    #[tokio::test]
    async fn config_serves_defaults() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(Request::builder().uri("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["stats"]["subscribers"], "122,000+");
    }

    #[tokio::test]
    async fn admin_orders_requires_token() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_orders_returns_reconciled_view() {
        let sessions = vec![paid_session(
            "cs_1",
            r#"[{"type":"premium","issueNumber":"10","dateStr":"2099-01-01","adCopy":"Hi","adUrl":"https://x.co","price":500}]"#,
        )];
        let app = app(Arc::new(InMemoryKvStore::new()), sessions);

        let response = app.oneshot(admin_get("/admin/orders")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["orders"][0]["adId"], "cs_1_0_2099-01-01");
        assert_eq!(body["stats"]["totalRevenue"], 500);
    }

    #[tokio::test]
    async fn admin_delete_records_cancellation() {
        let kv = Arc::new(InMemoryKvStore::new());
        let app = app(kv.clone(), vec![]);

        let response = app
            .oneshot(admin_post("/admin/delete", r#"{"adId": "cs_1_0_12"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);

        let stored = kv.get("cancelled_ads").await.unwrap().unwrap();
        assert!(stored.contains("cs_1_0_12"));
    }

    #[tokio::test]
    async fn admin_delete_rejects_blank_id() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(admin_post("/admin/delete", r#"{"adId": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing adId");
    }

    #[tokio::test]
    async fn admin_edit_round_trips_through_edits() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .clone()
            .oneshot(admin_post(
                "/admin/edit",
                r#"{"adId": "cs_1_0_12", "adCopy": "Better", "adUrl": "https://x.co"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(admin_get("/admin/edits")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cs_1_0_12"]["adCopy"], "Better");
    }

    #[tokio::test]
    async fn admin_send_report_validates_fields() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(admin_post(
                "/admin/send-report",
                r#"{"adId": "cs_1_0_12", "customerEmail": "", "clicks": 10}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn admin_backup_sets_attachment_disposition() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app.oneshot(admin_get("/admin/backup")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"adboard-backup-"));

        let body = body_json(response).await;
        assert!(body["exportedAt"].is_string());
        assert!(body["completedOrders"].is_array());
    }

    #[tokio::test]
    async fn admin_config_update_rejects_invalid_shape() {
        let app = app(Arc::new(InMemoryKvStore::new()), vec![]);

        let response = app
            .oneshot(admin_post("/admin/config", r#"{"stats": null}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid config format");
    }

    #[tokio::test]
    async fn admin_config_update_persists() {
        let kv = Arc::new(InMemoryKvStore::new());
        let app = app(kv.clone(), vec![]);

        let response = app
            .oneshot(admin_post(
                "/admin/config",
                r#"{
                    "stats": {"subscribers": "150,000+", "openRate": "48%"},
                    "testimonials": []
                }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let stored = kv.get("site_config").await.unwrap().unwrap();
        assert!(stored.contains("150,000+"));
    }
}
