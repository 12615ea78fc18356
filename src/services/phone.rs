/// Strips every non-digit character.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// E.164 form of a normalized number, assuming North America for bare
/// ten-digit numbers.
pub fn to_e164(digits: &str) -> String {
    match digits.len() {
        10 => format!("+1{digits}"),
        _ => format!("+{digits}"),
    }
}
