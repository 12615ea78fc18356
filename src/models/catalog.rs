use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const SERVICES: &[&str] = &[
    "Initial Consultation",
    "Follow-up Appointment",
    "Strategy Session",
    "Review Meeting",
];

pub const TIME_SLOTS: &[&str] = &[
    "9:00 AM", "10:00 AM", "11:00 AM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM", "5:00 PM",
];

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

pub fn parse_slot(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%I:%M %p").ok()
}

/// Start of the appointment as a local wall-clock time.
pub fn slot_start(date: &str, label: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_slot(label)?))
}

/// End of an appointment; `None` when it falls outside the representable range.
pub fn slot_end(start: NaiveDateTime, duration_minutes: i64) -> Option<NaiveDateTime> {
    start.checked_add_signed(Duration::try_minutes(duration_minutes)?)
}
