use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Only the required-field check.
    Basic,
    /// Required fields plus email, phone and date checks.
    Strict,
}

impl ValidationMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "basic" => ValidationMode::Basic,
            _ => ValidationMode::Strict,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// `None` disables persistence.
    pub database_url: Option<String>,
    pub validation_mode: ValidationMode,
    pub appointment_duration_minutes: i64,
    pub business_name: String,
    pub business_phone: String,
    pub crm_api_url: String,
    pub crm_api_key: String,
    pub crm_location_id: String,
    pub crm_calendar_id: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: match env::var("DATABASE_URL") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => Some("bookings.db".to_string()),
            },
            validation_mode: env::var("VALIDATION_MODE")
                .map(|v| ValidationMode::parse(&v))
                .unwrap_or(ValidationMode::Strict),
            appointment_duration_minutes: env::var("APPOINTMENT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(60),
            business_name: env::var("BUSINESS_NAME")
                .unwrap_or_else(|_| "Consultation Services".to_string()),
            business_phone: env::var("BUSINESS_PHONE").unwrap_or_default(),
            crm_api_url: env::var("CRM_API_URL")
                .unwrap_or_else(|_| "https://services.leadconnectorhq.com".to_string()),
            crm_api_key: env::var("CRM_API_KEY").unwrap_or_default(),
            crm_location_id: env::var("CRM_LOCATION_ID").unwrap_or_default(),
            crm_calendar_id: env::var("CRM_CALENDAR_ID").unwrap_or_default(),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER").unwrap_or_default(),
        }
    }

    pub fn crm_enabled(&self) -> bool {
        !self.crm_api_key.is_empty()
    }

    pub fn sms_enabled(&self) -> bool {
        !self.twilio_account_sid.is_empty()
    }
}
