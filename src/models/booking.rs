use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw booking submission as posted by the form or an API client.
///
/// Every text field is optional so that a missing value surfaces as a
/// validation failure instead of a body decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub sms_opt_in: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

// Checkboxes post "on"; JSON clients send a boolean.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag: Option<Flag> = Option::deserialize(deserializer)?;
    Ok(match flag {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
        None => false,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Digits only.
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub sms_opt_in: bool,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(BookingStatus::Confirmed),
            _ => None,
        }
    }
}
