//! # Salon Payments Service
//!
//! HTTP/JSON payment service for the salon booking application.
//!
//! ## Endpoints
//!
//! 1. **Payments**: charge by card, PayPal, Apple Pay or gift card; refund;
//!    history; analytics; gift card validation
//! 2. **Appointments**: the bookings a payment confirms
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and request/response lifecycle
//! - `PaymentService` orchestrates simulated gateways over injected stores
//! - State lives in memory for the lifetime of the process

use tracing::info;

use salon_payments::config::AppConfig;
use salon_payments::{create_app, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salon_payments=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting salon payments service");

    let config = AppConfig::from_env()?;
    let state = AppState::in_memory(&config.payments);

    if config.seed_demo_data {
        seed::seed_demo_data(&state).await;
    }

    let app = create_app(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
