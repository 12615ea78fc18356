pub mod twilio;

use async_trait::async_trait;

use crate::models::Booking;

/// Outbound text messaging used for booking confirmations.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

pub fn confirmation_text(business_name: &str, booking: &Booking) -> String {
    format!(
        "Hi {}, your {} with {} is confirmed for {} at {}. Ref {}. Reply STOP to opt out.",
        booking.first_name, booking.service, business_name, booking.date, booking.time, booking.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;

    #[test]
    fn test_confirmation_text() {
        let now = chrono::Utc::now().naive_utc();
        let booking = Booking {
            id: "APT-1-abcd".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234567".to_string(),
            service: "Review Meeting".to_string(),
            date: "2026-02-03".to_string(),
            time: "3:00 PM".to_string(),
            sms_opt_in: true,
            notes: None,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        let text = confirmation_text("Acme Advisory", &booking);
        assert!(text.starts_with("Hi Jane,"));
        assert!(text.contains("Review Meeting with Acme Advisory"));
        assert!(text.contains("2026-02-03 at 3:00 PM"));
        assert!(text.contains("APT-1-abcd"));
        assert!(text.ends_with("Reply STOP to opt out."));
    }
}
