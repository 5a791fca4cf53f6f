//! Payment routes.
//!
//! POST /api/payments/process            - Charge a payment
//! GET  /api/payments/history            - Paginated payment history
//! GET  /api/payments/analytics          - Revenue and breakdowns
//! GET  /api/payments/{id}               - Retrieve a payment by ID
//! POST /api/payments/refund             - Refund a completed payment
//! POST /api/payments/validate-gift-card - Check a gift card code

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use super::{json_body, path_param, query_params};
use crate::error::Result;
use crate::models::{
    AnalyticsQuery, GiftCardValidation, HistoryQuery, Payment, PaymentAnalytics, PaymentHistory,
    PaymentReceipt, ProcessPaymentRequest, RefundReceipt, RefundRequest, ValidateGiftCardRequest,
};
use crate::state::AppState;

/// Build the payments router.
pub fn router() -> Router {
    Router::new()
        .route("/api/payments/process", post(process_payment))
        .route("/api/payments/history", get(payment_history))
        .route("/api/payments/analytics", get(payment_analytics))
        .route("/api/payments/refund", post(refund_payment))
        .route("/api/payments/validate-gift-card", post(validate_gift_card))
        .route("/api/payments/{id}", get(get_payment))
}

async fn process_payment(
    Extension(state): Extension<AppState>,
    payload: std::result::Result<Json<ProcessPaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentReceipt>> {
    let request = json_body(payload)?;
    let receipt = state.payments.process_payment(request).await?;
    Ok(Json(receipt))
}

async fn payment_history(
    Extension(state): Extension<AppState>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<PaymentHistory>> {
    let query = query_params(query)?;
    Ok(Json(state.payments.payment_history(query).await))
}

async fn payment_analytics(
    Extension(state): Extension<AppState>,
    query: std::result::Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<PaymentAnalytics>> {
    let query = query_params(query)?;
    Ok(Json(state.payments.analytics(query).await))
}

/// Retrieve a payment by ID.
async fn get_payment(
    Extension(state): Extension<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Payment>> {
    let id = path_param(id)?;
    Ok(Json(state.payments.get_payment(id).await?))
}

async fn refund_payment(
    Extension(state): Extension<AppState>,
    payload: std::result::Result<Json<RefundRequest>, JsonRejection>,
) -> Result<Json<RefundReceipt>> {
    let request = json_body(payload)?;
    Ok(Json(state.payments.refund_payment(request).await?))
}

async fn validate_gift_card(
    Extension(state): Extension<AppState>,
    payload: std::result::Result<Json<ValidateGiftCardRequest>, JsonRejection>,
) -> Result<Json<GiftCardValidation>> {
    let request = json_body(payload)?;
    Ok(Json(state.payments.check_gift_card(&request.code).await?))
}
