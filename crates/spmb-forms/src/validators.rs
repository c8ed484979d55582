//! Input format checks shared by the form engine and the portal.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns `true` for an Indonesian phone number: 10 to 13 digits starting
/// with `0`.
///
/// Spaces and dashes are ignored, so `0812-3456-7890` is accepted.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let mut digits = 0usize;
    let mut first = None;
    for c in phone.chars() {
        match c {
            ' ' | '-' => {}
            '0'..='9' => {
                first.get_or_insert(c);
                digits += 1;
            }
            _ => return false,
        }
    }
    first == Some('0') && (10..=13).contains(&digits)
}

/// Splits a comma-separated option list, trimming entries and dropping
/// empty ones.
pub fn parse_options(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
