use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Please choose a date that is today or later")]
    InvalidDate,

    #[error("Internal server error")]
    Server(#[source] anyhow::Error),
}

impl BookingError {
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::MissingFields => "VALIDATION_ERROR",
            BookingError::InvalidEmail => "INVALID_EMAIL",
            BookingError::InvalidPhone => "INVALID_PHONE",
            BookingError::InvalidDate => "INVALID_DATE",
            BookingError::Server(_) => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if let BookingError::Server(e) = &self {
            tracing::error!(error = %e, "booking request failed");
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
            "error": self.code(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
