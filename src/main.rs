use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bookingdesk::config::AppConfig;
use bookingdesk::db;
use bookingdesk::handlers;
use bookingdesk::services::crm::http::HttpCrmProvider;
use bookingdesk::services::crm::CrmProvider;
use bookingdesk::services::messaging::twilio::TwilioSmsProvider;
use bookingdesk::services::messaging::MessagingProvider;
use bookingdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let db = match &config.database_url {
        Some(path) => {
            tracing::info!("storing bookings in {path}");
            Some(Arc::new(Mutex::new(db::init_db(path)?)))
        }
        None => {
            tracing::warn!("DATABASE_URL is empty, bookings will not be stored");
            None
        }
    };

    let crm: Option<Box<dyn CrmProvider>> = if config.crm_enabled() {
        if config.crm_calendar_id.is_empty() {
            tracing::warn!("CRM_CALENDAR_ID is not set, appointment creation will likely fail");
        }
        tracing::info!("CRM integration enabled (url: {})", config.crm_api_url);
        Some(Box::new(HttpCrmProvider::new(
            config.crm_api_url.clone(),
            config.crm_api_key.clone(),
            config.crm_location_id.clone(),
            config.crm_calendar_id.clone(),
        )))
    } else {
        tracing::info!("CRM_API_KEY not set, CRM integration disabled");
        None
    };

    let messaging: Option<Box<dyn MessagingProvider>> = if config.sms_enabled() {
        anyhow::ensure!(
            !config.twilio_phone_number.is_empty(),
            "TWILIO_PHONE_NUMBER must be set when TWILIO_ACCOUNT_SID is set"
        );
        Some(Box::new(TwilioSmsProvider::new(
            config.twilio_account_sid.clone(),
            config.twilio_auth_token.clone(),
            config.twilio_phone_number.clone(),
        )))
    } else {
        None
    };

    tracing::info!(mode = ?config.validation_mode, "validation mode");

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        crm,
        messaging,
    });

    let app = Router::new()
        .route("/", get(handlers::pages::home))
        .route("/book", get(handlers::pages::booking_form))
        .route("/book", post(handlers::pages::submit_booking_form))
        .route("/assets/site.css", get(handlers::pages::stylesheet))
        .route(
            "/api/book-appointment",
            post(handlers::booking::book_appointment),
        )
        .route(
            "/calendar/:booking_id",
            get(handlers::calendar::download_ics),
        )
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
