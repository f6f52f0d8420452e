//! Display Formatting
//!
//! Pure helpers that turn raw API fields into the strings shown in lists
//! and the stats header.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::User;

/// Meters to kilometers with two decimals, e.g. `"5.23 km"`
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Seconds to `"1h 2m 3s"`, dropping leading zero units
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Minutes per kilometer to `"5:27 /km"`
pub fn format_pace(min_per_km: f64) -> String {
    if !min_per_km.is_finite() || min_per_km <= 0.0 {
        return "-".to_string();
    }
    let total_secs = (min_per_km * 60.0).round() as u64;
    format!("{}:{:02} /km", total_secs / 60, total_secs % 60)
}

/// Kilometers per hour with one decimal
pub fn format_speed(km_h: f64) -> String {
    format!("{:.1} km/h", km_h)
}

/// Calendar date as `dd.mm.yyyy`
///
/// Unparsable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d.%m.%Y").to_string(),
        None => value.to_string(),
    }
}

/// Date and time as `dd.mm.yyyy, HH:MM:SS`
///
/// Unparsable input is returned unchanged.
pub fn format_date_time(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d.%m.%Y, %H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

/// "Name Surname", whichever half is present, or `-`
pub fn user_full_name(user: &User) -> String {
    let name = user.name.as_deref().unwrap_or("").trim();
    let surname = user.surname.as_deref().unwrap_or("").trim();

    match (name.is_empty(), surname.is_empty()) {
        (false, false) => format!("{} {}", name, surname),
        (false, true) => name.to_string(),
        (true, false) => surname.to_string(),
        (true, true) => "-".to_string(),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare dates.
/// Offsets are kept as sent; no conversion to local time.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
