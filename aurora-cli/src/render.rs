//! Plain-text rendering of weather models.

use std::fmt;

use aurora_core::{
    Suggestion, WeatherModel,
    display::{comfort_message, format_day, format_time},
    describe_code_or_fallback, icon_for_code,
};

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "--".to_string())
}

fn percent(value: Option<f64>) -> String {
    value.map(|p| format!("{p:.0}%")).unwrap_or_else(|| "--".to_string())
}

pub fn weather(model: &WeatherModel) -> String {
    WeatherView(model).to_string()
}

/// Terminal layout of a [`WeatherModel`].
struct WeatherView<'a>(&'a WeatherModel);

impl fmt::Display for WeatherView<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let tz = model.timezone.as_deref();
        let current = &model.current;

        writeln!(out, "{}, {}  [{}]", model.location.name, model.location.country, model.sky)?;
        writeln!(
            out,
            "{} \u{b7} {}",
            model.location.region.as_deref().unwrap_or(""),
            model.location.coordinates
        )?;
        writeln!(out)?;

        let icon = icon_for_code(current.code).map(|c| format!("{c} ")).unwrap_or_default();
        writeln!(
            out,
            "Now  {icon}{}\u{b0}C  {}",
            or_dash(current.temperature),
            describe_code_or_fallback(current.code)
        )?;
        writeln!(out, "     Feels like {}\u{b0}C", or_dash(current.feels_like))?;
        writeln!(
            out,
            "     Humidity {}%  Wind {} km/h  Precip {} mm  UV {}",
            or_dash(current.humidity),
            or_dash(current.wind),
            or_dash(current.precipitation),
            or_dash(current.uv)
        )?;
        writeln!(out, "     {}", comfort_message(current.temperature, current.feels_like))?;

        match &model.next_rain_hour {
            Some(hour) => {
                writeln!(
                    out,
                    "     Rain most likely at {} ({})",
                    format_time(hour.time.as_deref(), tz),
                    percent(hour.precipitation_probability)
                )?;
            }
            None => {
                writeln!(out, "     No rain expected in the next hours")?;
            }
        }

        if !model.hourly.is_empty() {
            writeln!(out)?;
            writeln!(out, "Next hours")?;
            for hour in &model.hourly {
                writeln!(
                    out,
                    "  {:>8}  {:>4}\u{b0}C  rain {:>4}  wind {:>5}  UV {}",
                    format_time(hour.time.as_deref(), tz),
                    or_dash(hour.temperature),
                    percent(hour.precipitation_probability),
                    or_dash(hour.wind),
                    or_dash(hour.uv)
                )?;
            }
        }

        if !model.daily.is_empty() {
            writeln!(out)?;
            writeln!(out, "5-day outlook")?;
            for day in &model.daily {
                let icon = icon_for_code(day.code).unwrap_or(' ');
                writeln!(
                    out,
                    "  {:<12} {icon} {:>3}\u{b0} / {:>3}\u{b0}  rain {:>4}  UV {:<4}  sun {} - {}  {}",
                    format_day(day.date.as_deref(), tz),
                    or_dash(day.min),
                    or_dash(day.max),
                    percent(day.precipitation_probability),
                    or_dash(day.uv),
                    format_time(day.sunrise.as_deref(), tz),
                    format_time(day.sunset.as_deref(), tz),
                    describe_code_or_fallback(day.code)
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Updated {}", format_time(Some(model.last_updated.as_str()), tz))
    }
}

pub fn suggestions(items: &[Suggestion]) -> String {
    if items.is_empty() {
        return "No matching places.\n".to_string();
    }

    items
        .iter()
        .map(|s| format!("{:<40} {}\n", s.label, s.coordinates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::{Location, RawForecastPayload, normalize_at};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn amsterdam() -> Location {
        Location {
            name: "Amsterdam".to_string(),
            country: "Netherlands".to_string(),
            region: Some("North Holland".to_string()),
            latitude: 52.372,
            longitude: 4.8936,
            timezone: Some("Europe/Amsterdam".to_string()),
        }
    }

    fn model(payload: serde_json::Value) -> WeatherModel {
        let payload: RawForecastPayload = serde_json::from_value(payload).expect("fixture");
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid instant");
        normalize_at(&amsterdam(), &payload, now)
    }

    #[test]
    fn renders_full_forecast() {
        let out = weather(&model(json!({
            "timezone": "Europe/Amsterdam",
            "current": {
                "time": "2024-05-01T14:00",
                "temperature_2m": 17.4,
                "apparent_temperature": 16.2,
                "relative_humidity_2m": 71,
                "weather_code": 61
            },
            "hourly": {
                "time": ["2024-05-01T14:00", "2024-05-01T15:00"],
                "temperature_2m": [17.4, 18.1],
                "precipitation_probability": [10, 55]
            },
            "daily": {
                "time": ["2024-05-01"],
                "temperature_2m_min": [9.6],
                "temperature_2m_max": [18.2],
                "weathercode": [61],
                "sunrise": ["2024-05-01T06:13"],
                "sunset": ["2024-05-01T21:03"],
                "precipitation_probability_max": [60]
            }
        })));

        assert!(out.starts_with("Amsterdam, Netherlands  [rain]"));
        assert!(out.contains("North Holland \u{b7} 52.37, 4.89"));
        assert!(out.contains("17\u{b0}C  Light rain"));
        assert!(out.contains("Feels like 16\u{b0}C"));
        assert!(out.contains("Rain most likely at 3:00 PM (55%)"));
        assert!(out.contains("Wed, May 1"));
        assert!(out.contains("sun 6:13 AM - 9:03 PM"));
        assert!(out.contains("Updated 2:00 PM"));
    }

    #[test]
    fn renders_sparse_forecast_with_placeholders() {
        let out = weather(&model(json!({})));

        assert!(out.contains("--\u{b0}C  Live update"));
        assert!(out.contains("Weather comfort: --"));
        assert!(out.contains("No rain expected"));
        assert!(!out.contains("Next hours"));
        assert!(!out.contains("5-day outlook"));
        assert!(out.contains("Updated 12:00 PM"));
    }

    #[test]
    fn view_writes_through_any_formatter() {
        let m = model(json!({ "current": { "temperature_2m": 4.2, "weather_code": 71 } }));
        let padded = format!("{:>1}", WeatherView(&m));

        assert_eq!(padded, weather(&m));
        assert!(padded.contains("4\u{b0}C  Light snow"));
        assert!(padded.ends_with("Updated 12:00 PM\n"));
    }

    #[test]
    fn suggestion_list() {
        let items = vec![Suggestion::from(amsterdam())];
        let out = suggestions(&items);

        assert!(out.starts_with("Amsterdam, Netherlands"));
        assert!(out.trim_end().ends_with("52.37, 4.89"));
        assert_eq!(suggestions(&[]), "No matching places.\n");
    }
}
