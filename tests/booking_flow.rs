//! End-to-end booking flow through the HTTP API.
//!
//! Drives the real router with in-memory adapters: book a slot, deliver
//! the payment webhook, then work the admin surface against the
//! reconciled order book.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;

use adboard::adapters::http::{api_router, AppState};
use adboard::adapters::kv::InMemoryKvStore;
use adboard::config::{EmailConfig, PaymentConfig};
use adboard::domain::ad::{PaymentStatus, SessionSummary};
use adboard::domain::webhook::WebhookVerifier;
use adboard::ports::{
    CheckoutGateway, CreateSessionRequest, CreatedSession, GatewayError, KvStore, MailError,
    Mailer, OutboundEmail,
};

const TEST_SECRET: &str = "whsec_integration";
const ADMIN_TOKEN: &str = "integration-admin";

/// Gateway that turns every created session into a completed, paid one,
/// echoing back the metadata the checkout handler packed into it.
struct RecordingGateway {
    created: Mutex<Vec<CreateSessionRequest>>,
}

impl RecordingGateway {
    fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CheckoutGateway for RecordingGateway {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreatedSession, GatewayError> {
        let mut created = self.created.lock().unwrap();
        let id = format!("cs_flow_{}", created.len() + 1);
        created.push(request);
        Ok(CreatedSession {
            url: format!("https://checkout.stripe.com/c/pay/{id}"),
            id,
        })
    }

    async fn list_completed_sessions(
        &self,
        _limit: u32,
    ) -> Result<Vec<SessionSummary>, GatewayError> {
        let created = self.created.lock().unwrap();
        Ok(created
            .iter()
            .enumerate()
            .map(|(i, request)| SessionSummary {
                id: format!("cs_flow_{}", i + 1),
                payment_status: PaymentStatus::Paid,
                created: 1_700_000_000,
                customer_email: Some(request.customer_email.clone()),
                amount_total: Some(50_000),
                payment_intent: Some(format!("pi_flow_{}", i + 1)),
                metadata: request.metadata.iter().cloned().collect::<HashMap<_, _>>(),
            })
            .collect())
    }
}

struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

struct TestApp {
    router: Router,
    kv: Arc<InMemoryKvStore>,
    mailer: Arc<RecordingMailer>,
}

fn test_app() -> TestApp {
    let kv = Arc::new(InMemoryKvStore::new());
    let mailer = Arc::new(RecordingMailer {
        sent: Mutex::new(Vec::new()),
    });

    let state = AppState {
        kv: kv.clone(),
        gateway: Arc::new(RecordingGateway::new()),
        mailer: mailer.clone(),
        verifier: Arc::new(WebhookVerifier::new(TEST_SECRET)),
        payment: PaymentConfig {
            premium_price_id: "price_premium".to_string(),
            unclassified_price_id: "price_unclassified".to_string(),
            success_url: "https://ads.example.com/success".to_string(),
            cancel_url: "https://ads.example.com/book".to_string(),
            ..Default::default()
        },
        email: EmailConfig {
            resend_api_key: "re_test".to_string(),
            notification_email: "team@adboard.dev".to_string(),
            ..Default::default()
        },
        admin_token: ADMIN_TOKEN.to_string(),
    };

    TestApp {
        router: api_router().with_state(state),
        kv,
        mailer,
    }
}

fn json_post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn admin_request(method: &str, uri: &str, body: Option<String>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn booking_body() -> String {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "company": "Acme",
        "items": [{
            "type": "premium",
            "issueNumber": "42",
            "dateFormatted": "Jan 1, 2099",
            "dateStr": "2099-01-01",
            "adCopy": "Try **Acme** today",
            "adUrl": "https://acme.example.com",
            "price": 500
        }]
    })
    .to_string()
}

fn signed_webhook(session_id: &str) -> Request<Body> {
    let payload = serde_json::json!({
        "id": "evt_flow_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": session_id,
                "payment_status": "paid",
                "created": 1_700_000_000,
                "amount_total": 50_000,
                "payment_intent": "pi_flow_1",
                "metadata": {}
            }
        }
    })
    .to_string();

    let timestamp = Utc::now().timestamp();
    let signature = WebhookVerifier::new(TEST_SECRET).sign(timestamp, payload.as_bytes());

    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("stripe-signature", format!("t={timestamp},v1={signature}"))
        .body(Body::from(payload))
        .unwrap()
}

#[tokio::test]
async fn booking_payment_and_admin_lifecycle() {
    let app = test_app();

    // 1. Customer books a premium slot
    let response = app
        .router
        .clone()
        .oneshot(json_post("/create-checkout", booking_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["checkoutUrl"],
        "https://checkout.stripe.com/c/pay/cs_flow_1"
    );

    // Full order cached for the webhook
    assert!(app.kv.get("order_cs_flow_1").await.unwrap().is_some());

    // 2. Stripe confirms payment
    let response = app
        .router
        .clone()
        .oneshot(signed_webhook("cs_flow_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Durable record replaces the cache entry
    assert!(app.kv.get("order_cs_flow_1").await.unwrap().is_none());
    assert!(app.kv.get("completed_cs_flow_1").await.unwrap().is_some());

    // Team notification then customer confirmation
    {
        let sent = app.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "team@adboard.dev");
        assert_eq!(sent[1].to, "jane@example.com");
        assert!(sent[0].subject.contains("$500"));
    }

    // 3. The slot shows up as booked inventory
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/inventory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let inventory = body_json(response).await;
    assert_eq!(inventory["42"]["premium"], true);

    // 4. Admin sees the reconciled order
    let response = app
        .router
        .clone()
        .oneshot(admin_request("GET", "/admin/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let orders = body_json(response).await;
    let ad_id = orders["orders"][0]["adId"].as_str().unwrap().to_string();
    assert_eq!(ad_id, "cs_flow_1_0_2099-01-01");
    assert_eq!(orders["orders"][0]["customerName"], "Jane Doe");
    assert_eq!(orders["stats"]["totalRevenue"], 500);

    // 5. Admin rewrites the copy; the edit wins at reconciliation
    let response = app
        .router
        .clone()
        .oneshot(admin_request(
            "POST",
            "/admin/edit",
            Some(
                serde_json::json!({
                    "adId": ad_id,
                    "adCopy": "Acme, now improved",
                    "adUrl": "https://acme.example.com/v2"
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(admin_request("GET", "/admin/orders", None))
        .await
        .unwrap();
    let orders = body_json(response).await;
    assert_eq!(orders["orders"][0]["adCopy"], "Acme, now improved");
    assert_eq!(orders["orders"][0]["edited"], true);

    // 6. Admin cancels the ad; it drops out of orders and inventory
    let response = app
        .router
        .clone()
        .oneshot(admin_request(
            "POST",
            "/admin/delete",
            Some(serde_json::json!({ "adId": ad_id }).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(admin_request("GET", "/admin/orders", None))
        .await
        .unwrap();
    let orders = body_json(response).await;
    assert!(orders["orders"].as_array().unwrap().is_empty());
    assert_eq!(orders["stats"]["totalRevenue"], 500);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/inventory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let inventory = body_json(response).await;
    assert!(inventory.as_object().unwrap().is_empty());

    // 7. The backup still carries the completed order
    let response = app
        .router
        .clone()
        .oneshot(admin_request("GET", "/admin/backup", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let backup = body_json(response).await;
    assert_eq!(backup["completedOrders"][0]["name"], "Jane Doe");
    assert_eq!(backup["cancelledAds"][0], ad_id);
}

#[tokio::test]
async fn admin_surface_rejects_bad_tokens() {
    let app = test_app();

    for uri in ["/admin/orders", "/admin/edits", "/admin/backup"] {
        let request = Request::builder()
            .uri(uri)
            .header("authorization", "Bearer wrong-token")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
