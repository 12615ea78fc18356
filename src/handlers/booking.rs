use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use axum::Json;
use serde::Serialize;

use crate::errors::BookingError;
use crate::models::BookingRequest;
use crate::services::booking::{self, AppointmentSummary, IntegrationReport};
use crate::state::AppState;

/// Booking submission decoded from either a JSON or a form-encoded body,
/// chosen by `Content-Type` (JSON when absent).
pub struct BookingPayload(pub BookingRequest);

#[async_trait]
impl<S> FromRequest<S> for BookingPayload
where
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BookingError::Server(anyhow::anyhow!("failed to read body: {e}")))?;

        let parsed: anyhow::Result<BookingRequest> = if is_form {
            serde_urlencoded::from_bytes(&bytes).context("malformed form body")
        } else {
            serde_json::from_slice(&bytes).context("malformed JSON body")
        };

        parsed.map(BookingPayload).map_err(BookingError::Server)
    }
}

#[derive(Serialize)]
pub struct BookingResponse {
    success: bool,
    message: String,
    appointment: AppointmentSummary,
    integrations: IntegrationReport,
}

// POST /api/book-appointment
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    BookingPayload(req): BookingPayload,
) -> Result<Json<BookingResponse>, BookingError> {
    let confirmation = booking::submit_booking(&state, &req).await?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Appointment scheduled successfully".to_string(),
        appointment: confirmation.summary(),
        integrations: confirmation.integrations,
    }))
}
