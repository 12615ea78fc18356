use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::db::queries;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

// GET /calendar/:booking_id
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let booking_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let Some(db) = state.db.as_ref() else {
        return (StatusCode::NOT_FOUND, "Booking not found").into_response();
    };

    let lookup = db
        .lock()
        .map_err(|_| anyhow::anyhow!("database lock poisoned"))
        .and_then(|conn| queries::get_booking_by_id(&conn, booking_id));

    let booking = match lookup {
        Ok(Some(b)) => b,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Booking not found").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load booking for .ics");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
        }
    };

    let ics = match generate_ics(
        &booking,
        &state.config.business_name,
        state.config.appointment_duration_minutes,
    ) {
        Ok(ics) => ics,
        Err(e) => {
            tracing::warn!(error = %e, "booking cannot be exported as .ics");
            return (StatusCode::UNPROCESSABLE_ENTITY, "Booking has no usable date or time")
                .into_response();
        }
    };
    let filename = format!("booking-{booking_id}.ics");

    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response()
}
