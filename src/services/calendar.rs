use crate::models::catalog::{slot_end, slot_start};
use crate::models::Booking;

/// Builds a single-event iCalendar file for a booking. Times are floating
/// local times, matching how the slot was offered on the form.
pub fn generate_ics(
    booking: &Booking,
    business_name: &str,
    duration_minutes: i64,
) -> anyhow::Result<String> {
    let start = slot_start(&booking.date, &booking.time).ok_or_else(|| {
        anyhow::anyhow!(
            "booking {} has no usable date/time ({} {})",
            booking.id,
            booking.date,
            booking.time
        )
    })?;

    let end = slot_end(start, duration_minutes).ok_or_else(|| {
        anyhow::anyhow!("booking {} ends outside the supported date range", booking.id)
    })?;

    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = end.format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = booking.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = format!("{}@bookingdesk", booking.id);

    let summary = escape_text(&format!("{} with {}", booking.service, business_name));
    let description = escape_text(booking.notes.as_deref().unwrap_or("No additional notes"));

    Ok(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Bookingdesk//Appointments//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         STATUS:CONFIRMED\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

// RFC 5545 TEXT escaping.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::NaiveDateTime;

    fn booking(date: &str, time: &str, notes: Option<&str>) -> Booking {
        let created =
            NaiveDateTime::parse_from_str("2025-03-10 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Booking {
            id: "APT-123".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone: "5551112222".to_string(),
            service: "Strategy Session".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            sms_opt_in: false,
            notes: notes.map(str::to_string),
            status: BookingStatus::Confirmed,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_generate_ics() {
        let ics = generate_ics(&booking("2025-03-15", "2:00 PM", Some("Q2 plans")), "Acme", 60)
            .unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("DTSTART:20250315T140000"));
        assert!(ics.contains("DTEND:20250315T150000"));
        assert!(ics.contains("DTSTAMP:20250310T100000Z"));
        assert!(ics.contains("SUMMARY:Strategy Session with Acme"));
        assert!(ics.contains("DESCRIPTION:Q2 plans"));
        assert!(ics.contains("UID:APT-123@bookingdesk"));
        assert!(ics.contains("END:VCALENDAR"));
    }

    #[test]
    fn test_generate_ics_no_notes_and_escaping() {
        let ics =
            generate_ics(&booking("2025-04-01", "9:00 AM", None), "Smith, Jones; Co", 30).unwrap();
        assert!(ics.contains("DTSTART:20250401T090000"));
        assert!(ics.contains("DTEND:20250401T093000"));
        assert!(ics.contains("DESCRIPTION:No additional notes"));
        assert!(ics.contains("SUMMARY:Strategy Session with Smith\\, Jones\\; Co"));
    }

    #[test]
    fn test_generate_ics_unusable_slot() {
        assert!(generate_ics(&booking("someday", "9:00 AM", None), "Acme", 30).is_err());
    }

    #[test]
    fn test_generate_ics_end_out_of_range() {
        assert!(generate_ics(&booking("+262142-12-31", "11:30 PM", None), "Acme", 60).is_err());
        assert!(generate_ics(&booking("2025-04-01", "9:00 AM", None), "Acme", i64::MAX).is_err());
    }
}
