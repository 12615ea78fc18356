use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{CrmAppointment, CrmContact, CrmProvider};

const CONTACT_SOURCE: &str = "Booking Form";

/// REST client for the CRM's contact and calendar endpoints.
pub struct HttpCrmProvider {
    base_url: String,
    api_key: String,
    location_id: String,
    calendar_id: String,
    client: reqwest::Client,
}

impl HttpCrmProvider {
    pub fn new(base_url: String, api_key: String, location_id: String, calendar_id: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            location_id,
            calendar_id,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to call CRM endpoint {path}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read CRM response")?;

        if !status.is_success() {
            anyhow::bail!("CRM API error ({}): {}", status, text);
        }

        serde_json::from_str(&text).context("failed to parse CRM response")
    }
}

#[async_trait]
impl CrmProvider for HttpCrmProvider {
    async fn upsert_contact(&self, contact: &CrmContact) -> anyhow::Result<String> {
        let body = json!({
            "firstName": contact.first_name,
            "lastName": contact.last_name,
            "email": contact.email,
            "phone": contact.phone,
            "locationId": self.location_id,
            "source": CONTACT_SOURCE,
            "tags": contact.tags,
        });

        let data = self.post("/contacts/upsert", &body).await?;

        data["contact"]["id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing contact id in CRM response"))
    }

    async fn create_appointment(&self, appointment: &CrmAppointment) -> anyhow::Result<String> {
        let body = json!({
            "calendarId": self.calendar_id,
            "locationId": self.location_id,
            "contactId": appointment.contact_id,
            "startTime": appointment.start_time,
            "endTime": appointment.end_time,
            "title": appointment.title,
            "appointmentStatus": "confirmed",
            "notes": appointment.notes,
        });

        let data = self.post("/calendars/events/appointments", &body).await?;

        data["id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing appointment id in CRM response"))
    }
}
