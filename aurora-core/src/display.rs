//! Formatting helpers shared by front ends.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Resolves an IANA identifier, defaulting to UTC.
fn zone(timezone: Option<&str>) -> Tz {
    timezone.and_then(|tz| tz.parse::<Tz>().ok()).unwrap_or(Tz::UTC)
}

fn parse_naive(iso: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
}

/// Local wall-clock time of `iso`, e.g. "2:05 PM".
///
/// Timestamps carrying an offset are shifted into `timezone`; naive ones
/// (the forecast API reports local time) are printed as they are.
pub fn format_time(iso: Option<&str>, timezone: Option<&str>) -> String {
    const FMT: &str = "%-I:%M %p";

    let Some(iso) = iso.filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(&zone(timezone)).format(FMT).to_string();
    }

    parse_naive(iso)
        .map(|dt| dt.format(FMT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Calendar day of `iso`, e.g. "Wed, May 1". Empty when absent or unparseable.
pub fn format_day(iso: Option<&str>, timezone: Option<&str>) -> String {
    const FMT: &str = "%a, %b %-d";

    let Some(iso) = iso.filter(|s| !s.is_empty()) else {
        return String::new();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(&zone(timezone)).format(FMT).to_string();
    }

    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_naive(iso).map(|dt| dt.date()))
        .map(|d| d.format(FMT).to_string())
        .unwrap_or_default()
}

/// One-line comfort hint. Feels-like wins over air temperature.
pub fn comfort_message(temperature: Option<i64>, feels_like: Option<i64>) -> String {
    let Some(t) = feels_like.or(temperature) else {
        return "Weather comfort: --".to_string();
    };

    let hint = match t {
        t if t < 12 => "Cold \u{b7} bring a jacket",
        t if t < 20 => "Mild \u{b7} a light sweater will do",
        t if t < 28 => "Pleasant \u{b7} good for a walk",
        _ => "Hot \u{b7} drink water and avoid the sun",
    };
    format!("Weather comfort: {hint}")
}
