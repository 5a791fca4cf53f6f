//! # Salon Payments Library
//!
//! Exposes the Axum router and modules so integration tests can create
//! an in-process server without requiring `cargo run` in another terminal.

pub mod config;
pub mod error;
pub mod models;
pub mod processor_registry;
pub mod processors;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::PaymentError;
pub use state::AppState;

/// Build the Axum router with all route modules and middleware.
///
/// The caller is responsible for providing the application state.
/// This function does NOT start a server or seed any data.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::payments::router())
        .merge(routes::appointments::router())
        .merge(routes::health::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
