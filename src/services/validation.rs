use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ValidationMode;
use crate::errors::BookingError;
use crate::models::catalog::parse_date;
use crate::models::BookingRequest;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-()+.]{10,}$").expect("phone pattern compiles"));

/// A submission that passed validation, with blank optional values dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub sms_opt_in: bool,
    pub notes: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate(
    req: &BookingRequest,
    mode: ValidationMode,
    today: NaiveDate,
) -> Result<ValidBooking, BookingError> {
    let (
        Some(first_name),
        Some(last_name),
        Some(email),
        Some(phone),
        Some(service),
        Some(date),
        Some(time),
    ) = (
        present(&req.first_name),
        present(&req.last_name),
        present(&req.email),
        present(&req.phone),
        present(&req.service),
        present(&req.date),
        present(&req.time),
    )
    else {
        return Err(BookingError::MissingFields);
    };

    if mode == ValidationMode::Strict {
        if !is_valid_email(&email) {
            return Err(BookingError::InvalidEmail);
        }
        if !is_valid_phone(&phone) {
            return Err(BookingError::InvalidPhone);
        }
        match parse_date(&date) {
            Some(d) if d >= today => {}
            _ => return Err(BookingError::InvalidDate),
        }
    }

    Ok(ValidBooking {
        first_name,
        last_name,
        email,
        phone,
        service,
        date,
        time,
        sms_opt_in: req.sms_opt_in,
        notes: present(&req.notes),
    })
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone) && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 10
}
