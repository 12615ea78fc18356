use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use chrono::Local;

use crate::errors::BookingError;
use crate::models::BookingRequest;
use crate::services::booking::{submit_booking, StepOutcome};
use crate::state::AppState;
use crate::views;

use super::booking::BookingPayload;

pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(views::render_home(&state.config))
}

pub async fn booking_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(views::render_booking_form(
        &state.config,
        Local::now().date_naive(),
        &BookingRequest::default(),
        None,
    ))
}

// POST /book: plain form post without scripting
pub async fn submit_booking_form(
    State(state): State<Arc<AppState>>,
    payload: Result<BookingPayload, BookingError>,
) -> Response {
    let req = match payload {
        Ok(BookingPayload(req)) => req,
        Err(e) => return form_with_error(&state, &BookingRequest::default(), e),
    };

    match submit_booking(&state, &req).await {
        Ok(confirmation) => Html(views::render_confirmation(
            &state.config,
            &confirmation.booking,
            confirmation.integrations.database == StepOutcome::Completed,
        ))
        .into_response(),
        Err(e) => form_with_error(&state, &req, e),
    }
}

fn form_with_error(state: &AppState, req: &BookingRequest, error: BookingError) -> Response {
    if let BookingError::Server(e) = &error {
        tracing::error!(error = %e, "booking form submission failed");
    }

    let html = views::render_booking_form(
        &state.config,
        Local::now().date_naive(),
        req,
        Some(&error.to_string()),
    );
    (error.status(), Html(html)).into_response()
}

pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        views::SITE_CSS,
    )
}
