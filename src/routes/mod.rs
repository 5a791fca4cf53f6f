//! HTTP route modules for the payment service.
//!
//! - `payments`: charging, refunds, history, analytics, gift card checks
//! - `appointments`: the appointment records payments confirm
//! - `health`: liveness probe

pub mod appointments;
pub mod health;
pub mod payments;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;

use crate::error::PaymentError;

/// Unwrap a JSON body, reporting malformed input in the service's error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, PaymentError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| PaymentError::MissingField(rejection.body_text()))
}

/// Unwrap a path parameter, reporting an unparsable segment as a 400.
pub(crate) fn path_param<T>(param: Result<Path<T>, PathRejection>) -> Result<T, PaymentError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| PaymentError::InvalidRequest(rejection.body_text()))
}

/// Unwrap query parameters, reporting a malformed query string as a 400.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, PaymentError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| PaymentError::InvalidRequest(rejection.body_text()))
}
