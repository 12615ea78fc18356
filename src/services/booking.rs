use anyhow::Context;
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::BookingError;
use crate::models::catalog::{slot_end, slot_start};
use crate::models::{Booking, BookingRequest, BookingStatus};
use crate::services::crm::{CrmAppointment, CrmContact, CrmProvider};
use crate::services::messaging::confirmation_text;
use crate::services::phone::{normalize_phone, to_e164};
use crate::services::validation;
use crate::state::AppState;

/// What happened to one optional side effect of a booking.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Completed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationReport {
    pub crm: StepOutcome,
    pub database: StepOutcome,
    pub sms: StepOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub id: String,
    pub date: String,
    pub time: String,
    pub service: String,
    pub sms_opt_in: bool,
}

#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub integrations: IntegrationReport,
}

impl BookingConfirmation {
    pub fn summary(&self) -> AppointmentSummary {
        AppointmentSummary {
            id: self.booking.id.clone(),
            date: self.booking.date.clone(),
            time: self.booking.time.clone(),
            service: self.booking.service.clone(),
            sms_opt_in: self.booking.sms_opt_in,
        }
    }
}

/// `APT-<unix millis>-<8 hex chars>`.
pub fn generate_booking_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("APT-{millis}-{}", &suffix[..8])
}

/// Validates a submission and runs the optional side effects in order:
/// CRM sync, persistence, SMS confirmation. Side-effect failures are
/// reported in the returned [`IntegrationReport`], never as an error.
pub async fn submit_booking(
    state: &AppState,
    req: &BookingRequest,
) -> Result<BookingConfirmation, BookingError> {
    let valid = validation::validate(
        req,
        state.config.validation_mode,
        Local::now().date_naive(),
    )?;

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: generate_booking_id(),
        first_name: valid.first_name,
        last_name: valid.last_name,
        email: valid.email,
        phone: normalize_phone(&valid.phone),
        service: valid.service,
        date: valid.date,
        time: valid.time,
        sms_opt_in: valid.sms_opt_in,
        notes: valid.notes,
        status: BookingStatus::Confirmed,
        created_at: now,
        updated_at: now,
    };

    tracing::info!(
        id = %booking.id,
        name = %booking.full_name(),
        email = %booking.email,
        phone = %booking.phone,
        service = %booking.service,
        date = %booking.date,
        time = %booking.time,
        sms_opt_in = booking.sms_opt_in,
        "new appointment booked"
    );

    let crm = sync_to_crm(state, &booking).await;
    let database = persist(state, &booking);
    let sms = send_confirmation(state, &booking).await;

    Ok(BookingConfirmation {
        booking,
        integrations: IntegrationReport { crm, database, sms },
    })
}

async fn sync_to_crm(state: &AppState, booking: &Booking) -> StepOutcome {
    let Some(crm) = state.crm.as_deref() else {
        tracing::debug!(id = %booking.id, "CRM not configured, skipping");
        return StepOutcome::Skipped;
    };

    match push_to_crm(crm, booking, state.config.appointment_duration_minutes).await {
        Ok((contact_id, appointment_id)) => {
            tracing::info!(
                id = %booking.id,
                contact_id = %contact_id,
                appointment_id = %appointment_id,
                "booking synced to CRM"
            );
            StepOutcome::Completed
        }
        Err(e) => {
            let detail = format!("{e:#}");
            tracing::error!(error = %detail, id = %booking.id, "CRM sync failed");
            StepOutcome::Failed
        }
    }
}

async fn push_to_crm(
    crm: &dyn CrmProvider,
    booking: &Booking,
    duration_minutes: i64,
) -> anyhow::Result<(String, String)> {
    let start = slot_start(&booking.date, &booking.time)
        .ok_or_else(|| anyhow::anyhow!("unusable date/time: {} {}", booking.date, booking.time))?;
    let end = slot_end(start, duration_minutes)
        .ok_or_else(|| anyhow::anyhow!("appointment end out of range: {} {}", booking.date, booking.time))?;

    let mut tags = vec!["web-booking".to_string()];
    if booking.sms_opt_in {
        tags.push("sms-opt-in".to_string());
    }

    let contact = CrmContact {
        first_name: booking.first_name.clone(),
        last_name: booking.last_name.clone(),
        email: booking.email.clone(),
        phone: to_e164(&booking.phone),
        tags,
    };
    let contact_id = crm
        .upsert_contact(&contact)
        .await
        .context("contact upsert failed")?;

    let appointment = CrmAppointment {
        contact_id: contact_id.clone(),
        title: format!("{} - {}", booking.service, booking.full_name()),
        start_time: to_rfc3339_local(start),
        end_time: to_rfc3339_local(end),
        notes: booking.notes.clone(),
    };
    let appointment_id = crm
        .create_appointment(&appointment)
        .await
        .context("appointment creation failed")?;

    Ok((contact_id, appointment_id))
}

fn to_rfc3339_local(dt: NaiveDateTime) -> String {
    match Local.from_local_datetime(&dt).earliest() {
        Some(local) => local.to_rfc3339(),
        None => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
    }
}

fn persist(state: &AppState, booking: &Booking) -> StepOutcome {
    let Some(db) = state.db.as_ref() else {
        tracing::debug!(id = %booking.id, "persistence disabled, skipping");
        return StepOutcome::Skipped;
    };

    let result = db
        .lock()
        .map_err(|_| anyhow::anyhow!("database lock poisoned"))
        .and_then(|conn| queries::insert_booking(&conn, booking));

    match result {
        Ok(()) => StepOutcome::Completed,
        Err(e) => {
            tracing::error!(error = %e, id = %booking.id, "failed to store booking");
            StepOutcome::Failed
        }
    }
}

async fn send_confirmation(state: &AppState, booking: &Booking) -> StepOutcome {
    if !booking.sms_opt_in {
        return StepOutcome::Skipped;
    }
    let Some(messaging) = state.messaging.as_deref() else {
        tracing::debug!(id = %booking.id, "SMS not configured, skipping confirmation");
        return StepOutcome::Skipped;
    };

    let body = confirmation_text(&state.config.business_name, booking);
    match messaging.send_message(&to_e164(&booking.phone), &body).await {
        Ok(()) => StepOutcome::Completed,
        Err(e) => {
            tracing::error!(error = %e, id = %booking.id, "failed to send confirmation SMS");
            StepOutcome::Failed
        }
    }
}
