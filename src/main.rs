//! Adboard server binary.
//!
//! Loads configuration from the environment, connects the adapters,
//! and serves the booking API until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adboard::adapters::http::{api_router, AppState};
use adboard::adapters::kv::RedisKvStore;
use adboard::adapters::resend::ResendMailer;
use adboard::adapters::stripe::StripeGateway;
use adboard::config::AppConfig;
use adboard::domain::webhook::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        test_mode = config.payment.is_test_mode(),
        "starting adboard"
    );

    let kv = Arc::new(RedisKvStore::connect(&config.redis.url).await?);
    tracing::info!("connected to redis");

    let state = AppState {
        kv,
        gateway: Arc::new(StripeGateway::new(&config.payment)),
        mailer: Arc::new(ResendMailer::new(&config.email)),
        verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
        payment: config.payment.clone(),
        email: config.email.clone(),
        admin_token: config.admin.token.clone(),
    };

    let app = api_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
