use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format(TIMESTAMP_FORMAT).to_string();
    let updated_at = booking.updated_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO bookings (id, first_name, last_name, email, phone, service, appointment_date, appointment_time, sms_opt_in, notes, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.first_name,
            booking.last_name,
            booking.email,
            booking.phone,
            booking.service,
            booking.date,
            booking.time,
            booking.sms_opt_in as i32,
            booking.notes,
            booking.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, first_name, last_name, email, phone, service, appointment_date, appointment_time, sms_opt_in, notes, status, created_at, updated_at \
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(count)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let status_str: String = row.get(10)?;
    let status = BookingStatus::parse(&status_str)
        .ok_or_else(|| anyhow::anyhow!("unknown booking status: {status_str}"))?;
    let created_at_str: String = row.get(11)?;
    let updated_at_str: String = row.get(12)?;

    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        service: row.get(5)?,
        date: row.get(6)?,
        time: row.get(7)?,
        sms_opt_in: row.get::<_, i32>(8)? != 0,
        notes: row.get(9)?,
        status,
        created_at,
        updated_at,
    })
}
