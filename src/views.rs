use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::models::catalog::{SERVICES, TIME_SLOTS};
use crate::models::{Booking, BookingRequest};
use crate::services::phone::{normalize_phone, to_e164};

static HOME_HTML: &str = include_str!("web/home.html");
static BOOK_HTML: &str = include_str!("web/book.html");
static CONFIRMED_HTML: &str = include_str!("web/confirmed.html");
pub static SITE_CSS: &str = include_str!("web/site.css");

pub fn render_home(config: &AppConfig) -> String {
    let mut vars = base_vars(config);
    vars.insert("HELP_LINE", help_line(config, "Questions?"));
    fill(HOME_HTML, &vars)
}

/// Booking form, optionally re-populated with a rejected submission.
pub fn render_booking_form(
    config: &AppConfig,
    today: NaiveDate,
    values: &BookingRequest,
    error: Option<&str>,
) -> String {
    let value = |v: &Option<String>| escape_html(v.as_deref().unwrap_or(""));

    let mut vars = base_vars(config);
    vars.insert("HELP_LINE", help_line(config, "Need help or have questions?"));
    vars.insert("RESCHEDULE_LINE", reschedule_line(config));
    vars.insert("ERROR", escape_html(error.unwrap_or("")));
    vars.insert(
        "ERROR_HIDDEN",
        (if error.is_some() { "" } else { "hidden" }).to_string(),
    );
    vars.insert("FIRST_NAME", value(&values.first_name));
    vars.insert("LAST_NAME", value(&values.last_name));
    vars.insert("EMAIL", value(&values.email));
    vars.insert("PHONE", value(&values.phone));
    vars.insert("DATE", value(&values.date));
    vars.insert("NOTES", value(&values.notes));
    vars.insert("MIN_DATE", today.format("%Y-%m-%d").to_string());
    vars.insert(
        "SMS_CHECKED",
        (if values.sms_opt_in { "checked" } else { "" }).to_string(),
    );
    vars.insert(
        "SERVICE_OPTIONS",
        options(SERVICES, values.service.as_deref()),
    );
    vars.insert("TIME_OPTIONS", options(TIME_SLOTS, values.time.as_deref()));
    fill(BOOK_HTML, &vars)
}

pub fn render_confirmation(config: &AppConfig, booking: &Booking, stored: bool) -> String {
    let mut vars = base_vars(config);
    vars.insert("FIRST_NAME", escape_html(&booking.first_name));
    vars.insert("DATE", escape_html(&booking.date));
    vars.insert("TIME", escape_html(&booking.time));
    vars.insert("BOOKING_ID", escape_html(&booking.id));
    vars.insert("RESCHEDULE_LINE", reschedule_line(config));
    vars.insert(
        "SMS_LINE",
        if booking.sms_opt_in {
            format!(
                "<li>SMS reminders will be sent to {}</li>",
                escape_html(&booking.phone)
            )
        } else {
            String::new()
        },
    );
    vars.insert(
        "CALENDAR_LINK",
        if stored {
            format!(
                "<p><a href=\"/calendar/{}.ics\">Add to calendar (.ics)</a></p>",
                escape_html(&booking.id)
            )
        } else {
            String::new()
        },
    );
    fill(CONFIRMED_HTML, &vars)
}

fn base_vars(config: &AppConfig) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("BUSINESS_NAME", escape_html(&config.business_name));
    vars
}

fn help_line(config: &AppConfig, lead: &str) -> String {
    if config.business_phone.is_empty() {
        return String::new();
    }
    format!(
        "<p class=\"centered small muted\">{lead} Call us at <a href=\"tel:{}\">{}</a></p>",
        to_e164(&normalize_phone(&config.business_phone)),
        escape_html(&config.business_phone)
    )
}

fn reschedule_line(config: &AppConfig) -> String {
    if config.business_phone.is_empty() {
        return String::new();
    }
    format!(
        "<li>If you need to reschedule, call {}</li>",
        escape_html(&config.business_phone)
    )
}

fn options(choices: &[&str], selected: Option<&str>) -> String {
    choices
        .iter()
        .map(|choice| {
            let escaped = escape_html(choice);
            let sel = if selected == Some(*choice) { " selected" } else { "" };
            format!("<option value=\"{escaped}\"{sel}>{escaped}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single-pass `{{KEY}}` substitution; unknown keys render empty so
/// substituted values are never re-scanned.
fn fill(template: &str, vars: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                if let Some(value) = vars.get(&after[..end]) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
