use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookingdesk::config::{AppConfig, ValidationMode};
use bookingdesk::handlers;
use bookingdesk::services::crm::http::HttpCrmProvider;
use bookingdesk::services::crm::{CrmAppointment, CrmContact, CrmProvider};
use bookingdesk::state::AppState;

// (path, authorization header, body)
type Seen = Arc<Mutex<Vec<(String, String, Value)>>>;

fn record(seen: &Seen, path: &str, headers: &HeaderMap, body: Value) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    seen.lock().unwrap().push((path.to_string(), auth, body));
}

async fn upsert_contact(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&seen, "/contacts/upsert", &headers, body);
    Json(json!({ "new": true, "contact": { "id": "contact-42" } }))
}

async fn create_appointment(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&seen, "/calendars/events/appointments", &headers, body);
    Json(json!({ "id": "appt-7", "appointmentStatus": "confirmed" }))
}

async fn rejected() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid JWT" })),
    )
}

/// Starts a stand-in CRM on a random local port and returns its base URL.
async fn spawn_crm(seen: Seen) -> String {
    let app = Router::new()
        .route("/contacts/upsert", post(upsert_contact))
        .route("/calendars/events/appointments", post(create_appointment))
        .route("/denied/contacts/upsert", post(rejected))
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn provider(base_url: String) -> HttpCrmProvider {
    HttpCrmProvider::new(
        base_url,
        "secret-key".to_string(),
        "loc-1".to_string(),
        "cal-1".to_string(),
    )
}

#[tokio::test]
async fn test_upsert_contact_and_create_appointment() {
    let seen: Seen = Arc::new(Mutex::new(vec![]));
    let base = spawn_crm(seen.clone()).await;
    let crm = provider(format!("{base}/"));

    let contact_id = crm
        .upsert_contact(&CrmContact {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+15551234567".to_string(),
            tags: vec!["web-booking".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(contact_id, "contact-42");

    let appointment_id = crm
        .create_appointment(&CrmAppointment {
            contact_id,
            title: "Strategy Session - Jane Doe".to_string(),
            start_time: "2026-11-02T10:00:00-08:00".to_string(),
            end_time: "2026-11-02T11:00:00-08:00".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(appointment_id, "appt-7");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);

    let (path, auth, body) = &seen[0];
    assert_eq!(path, "/contacts/upsert");
    assert_eq!(auth, "Bearer secret-key");
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["phone"], "+15551234567");
    assert_eq!(body["locationId"], "loc-1");
    assert_eq!(body["tags"], json!(["web-booking"]));

    let (path, auth, body) = &seen[1];
    assert_eq!(path, "/calendars/events/appointments");
    assert_eq!(auth, "Bearer secret-key");
    assert_eq!(body["calendarId"], "cal-1");
    assert_eq!(body["contactId"], "contact-42");
    assert_eq!(body["startTime"], "2026-11-02T10:00:00-08:00");
    assert_eq!(body["appointmentStatus"], "confirmed");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let seen: Seen = Arc::new(Mutex::new(vec![]));
    let base = spawn_crm(seen).await;
    let crm = provider(format!("{base}/denied"));

    let err = crm
        .upsert_contact(&CrmContact {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+15551234567".to_string(),
            tags: vec![],
        })
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("401"), "unexpected error: {message}");
    assert!(message.contains("Invalid JWT"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_booking_endpoint_talks_to_crm() {
    let seen: Seen = Arc::new(Mutex::new(vec![]));
    let base = spawn_crm(seen.clone()).await;

    let config = AppConfig {
        port: 3000,
        database_url: None,
        validation_mode: ValidationMode::Strict,
        appointment_duration_minutes: 30,
        business_name: "Test Advisory".to_string(),
        business_phone: String::new(),
        crm_api_url: base.clone(),
        crm_api_key: "secret-key".to_string(),
        crm_location_id: "loc-1".to_string(),
        crm_calendar_id: "cal-1".to_string(),
        twilio_account_sid: String::new(),
        twilio_auth_token: String::new(),
        twilio_phone_number: String::new(),
    };
    let state = Arc::new(AppState {
        db: None,
        config,
        crm: Some(Box::new(provider(base))),
        messaging: None,
    });

    let tomorrow = (chrono::Local::now().date_naive() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let payload = json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "phone": "(555) 123-4567",
        "service": "Strategy Session",
        "date": tomorrow,
        "time": "3:00 PM",
        "smsOptIn": false,
    });

    let app = Router::new()
        .route(
            "/api/book-appointment",
            post(handlers::booking::book_appointment),
        )
        .with_state(state);
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/book-appointment")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["integrations"]["crm"], "completed");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].2["title"], "Strategy Session - Jane Doe");
    let start = seen[1].2["startTime"].as_str().unwrap();
    let end = seen[1].2["endTime"].as_str().unwrap();
    assert!(start.starts_with(&format!("{tomorrow}T15:00:00")));
    assert!(end.starts_with(&format!("{tomorrow}T15:30:00")));
}
