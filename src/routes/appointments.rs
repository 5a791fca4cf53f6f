//! Appointment routes.
//!
//! POST /api/appointments      - Book an appointment (status pending)
//! GET  /api/appointments      - List appointments
//! GET  /api/appointments/{id} - Retrieve an appointment by ID

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::info;

use super::{json_body, path_param};
use crate::error::{PaymentError, Result};
use crate::models::{Appointment, CreateAppointmentRequest};
use crate::state::AppState;

/// Build the appointments router.
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/appointments/{id}", get(get_appointment))
}

async fn create_appointment(
    Extension(state): Extension<AppState>,
    payload: std::result::Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>)> {
    let request = json_body(payload)?;
    let appointment = state.appointments.create(request).await;
    info!("Appointment {} booked", appointment.id);
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn list_appointments(Extension(state): Extension<AppState>) -> Json<Vec<Appointment>> {
    Json(state.appointments.list().await)
}

async fn get_appointment(
    Extension(state): Extension<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Appointment>> {
    let id = path_param(id)?;
    state
        .appointments
        .get(id)
        .await
        .map(Json)
        .ok_or(PaymentError::AppointmentNotFound)
}
