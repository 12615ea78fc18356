pub mod http;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// E.164.
    pub phone: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmAppointment {
    pub contact_id: String,
    pub title: String,
    /// RFC 3339.
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Customer-relationship-management backend that tracks contacts and
/// their calendar appointments.
#[async_trait]
pub trait CrmProvider: Send + Sync {
    /// Creates or updates the contact and returns its CRM id.
    async fn upsert_contact(&self, contact: &CrmContact) -> anyhow::Result<String>;

    /// Returns the id of the created appointment.
    async fn create_appointment(&self, appointment: &CrmAppointment) -> anyhow::Result<String>;
}
