//! Formatting helpers shared by the placeholder catalog.

use chrono::{DateTime, Utc};

/// Fixed human format used for every `*.created_at`-style placeholder.
pub const HUMAN_DATE: &str = "%m/%d/%Y, %I:%M %p";

/// `1234567` -> `"1,234,567"`.
pub fn comma(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1` -> `"1st"`, `12` -> `"12th"`, `23` -> `"23rd"`.
pub fn ordinal(value: u64) -> String {
    let suffix = match (value % 10, value % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{value}{suffix}")
}

pub fn human_date(dt: &DateTime<Utc>) -> String {
    dt.format(HUMAN_DATE).to_string()
}

pub fn unix(dt: &DateTime<Utc>) -> String {
    dt.timestamp().to_string()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// `0x5865f2` -> `"#5865f2"`.
pub fn hex_color(value: u32) -> String {
    format!("#{:06x}", value & 0xFF_FFFF)
}

/// Backslash-escape characters that chat markdown would interpret.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '_' | '~' | '|' | '`' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first letter of every word, lowercase the rest.
///
/// A "word" starts after any non-alphabetic character, so `"o'neil"` becomes
/// `"O'Neil"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }
    out
}
