//! Error taxonomy for the payment service.
//!
//! `PaymentError` is returned by every service operation. Route handlers
//! return it directly; the `IntoResponse` impl maps each variant to an HTTP
//! status and the `{ "success": false, "error": ... }` body the front end
//! expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{0}")]
    MissingField(String),

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Amount above the per-payment ceiling or finer than cents.
    #[error("{0}")]
    AmountOutOfRange(String),

    /// Malformed path segment or query string.
    #[error("{0}")]
    InvalidRequest(String),

    /// One or more card validation failures, reported together.
    #[error("{}", .0.join(", "))]
    InvalidCard(Vec<String>),

    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(String),

    /// Card-level gift card rejection (unknown, expired, empty).
    #[error("{0}")]
    GiftCard(String),

    #[error("Insufficient gift card balance. Available: ${available:.2}")]
    InsufficientBalance { available: Decimal },

    #[error("Payment declined by bank")]
    Declined,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Payment cannot be refunded")]
    NotRefundable,

    #[error("{0}")]
    InvalidRefund(String),

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::MissingField(_)
            | PaymentError::InvalidAmount
            | PaymentError::AmountOutOfRange(_)
            | PaymentError::InvalidRequest(_)
            | PaymentError::InvalidCard(_)
            | PaymentError::UnsupportedMethod(_)
            | PaymentError::GiftCard(_)
            | PaymentError::InsufficientBalance { .. }
            | PaymentError::NotRefundable
            | PaymentError::InvalidRefund(_) => StatusCode::BAD_REQUEST,
            PaymentError::PaymentNotFound | PaymentError::AppointmentNotFound => {
                StatusCode::NOT_FOUND
            }
            PaymentError::Declined | PaymentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, "Request failed: {}", self);
        } else {
            warn!(status = %status, "Request rejected: {}", self);
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

pub type Result<T, E = PaymentError> = std::result::Result<T, E>;
