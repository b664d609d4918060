//! Turns a raw forecast payload into a [`WeatherModel`].
//!
//! Normalization never fails: anything missing or malformed becomes `None`.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    codes::classify_sky,
    model::{
        CurrentConditions, DailyEntry, HourlyEntry, Location, LocationSummary, RawCurrent,
        RawDaily, RawForecastPayload, RawHourly, WeatherModel,
    },
};

pub const HOURLY_LIMIT: usize = 8;
pub const DAILY_LIMIT: usize = 5;
/// Window scanned for the next rain hour. It is applied to the hourly list
/// after truncation, so at most [`HOURLY_LIMIT`] hours are ever considered.
pub const RAIN_WINDOW: usize = 12;

/// Rounds half up (toward positive infinity), yielding `None` for missing or
/// non-finite values and for results that do not fit in an `i64`.
pub fn round(value: Option<f64>) -> Option<i64> {
    let value = value.filter(|v| v.is_finite())?;
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // i64::MAX as f64 is 2^63, which is itself out of range.
    (i64::MIN as f64..i64::MAX as f64).contains(&rounded).then_some(rounded as i64)
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.2}, {longitude:.2}")
}

/// Builds a model, falling back to the current time for `last_updated`.
pub fn normalize(location: &Location, payload: &RawForecastPayload) -> WeatherModel {
    normalize_at(location, payload, Utc::now())
}

/// Builds a model, falling back to `now` for `last_updated`.
pub fn normalize_at(
    location: &Location,
    payload: &RawForecastPayload,
    now: DateTime<Utc>,
) -> WeatherModel {
    let hourly = payload.hourly.as_ref().map(hourly_entries).unwrap_or_default();
    let daily = payload.daily.as_ref().map(daily_entries).unwrap_or_default();
    let next_rain_hour = next_rain_hour(&hourly).cloned();

    let current = payload.current.as_ref().map(current_conditions).unwrap_or_default();
    let last_updated = payload
        .current
        .as_ref()
        .and_then(|c| c.time.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

    WeatherModel {
        timezone: payload.timezone.clone(),
        location: LocationSummary {
            name: location.name.clone(),
            country: location.country.clone(),
            region: location.region.clone(),
            coordinates: format_coordinates(location.latitude, location.longitude),
        },
        sky: classify_sky(current.code),
        current,
        hourly,
        daily,
        next_rain_hour,
        last_updated,
    }
}

/// Aligned read of `series[index]`; out-of-range reads are absent.
fn at<T: Clone>(series: &[Option<T>], index: usize) -> Option<T> {
    series.get(index).cloned().flatten()
}

fn hourly_entries(raw: &RawHourly) -> Vec<HourlyEntry> {
    raw.time
        .iter()
        .take(HOURLY_LIMIT)
        .enumerate()
        .map(|(i, time)| HourlyEntry {
            time: time.clone(),
            temperature: round(at(&raw.temperature, i)),
            precipitation_probability: at(&raw.precipitation_probability, i),
            uv: at(&raw.uv_index, i),
            wind: at(&raw.wind_speed, i),
        })
        .collect()
}

fn daily_entries(raw: &RawDaily) -> Vec<DailyEntry> {
    raw.time
        .iter()
        .take(DAILY_LIMIT)
        .enumerate()
        .map(|(i, date)| DailyEntry {
            date: date.clone(),
            min: round(at(&raw.temperature_min, i)),
            max: round(at(&raw.temperature_max, i)),
            code: at(&raw.weather_code, i),
            uv: at(&raw.uv_index_max, i),
            sunrise: at(&raw.sunrise, i),
            sunset: at(&raw.sunset, i),
            precipitation_probability: at(&raw.precipitation_probability_max, i),
        })
        .collect()
}

/// The hour with the strictly highest positive precipitation probability.
/// Ties keep the earliest hour.
fn next_rain_hour(hourly: &[HourlyEntry]) -> Option<&HourlyEntry> {
    hourly
        .iter()
        .take(RAIN_WINDOW)
        .fold(None, |best: Option<&HourlyEntry>, entry| {
            let threshold = best.and_then(|b| b.precipitation_probability).unwrap_or(0.0);
            match entry.precipitation_probability {
                Some(p) if p > threshold => Some(entry),
                _ => best,
            }
        })
}

fn current_conditions(raw: &RawCurrent) -> CurrentConditions {
    CurrentConditions {
        temperature: round(raw.temperature),
        feels_like: round(raw.apparent_temperature),
        humidity: round(raw.humidity),
        precipitation: round(raw.precipitation),
        wind: round(raw.wind_speed),
        code: raw.weather_code,
        uv: round(raw.uv_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::SkyTheme;
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

    fn payload(value: serde_json::Value) -> RawForecastPayload {
        serde_json::from_value(value).expect("fixture payload should decode")
    }

    fn hourly_with_precip(precip: serde_json::Value) -> RawForecastPayload {
        let len = precip.as_array().map(Vec::len).unwrap_or(0);
        let times: Vec<String> = (0..len).map(|h| format!("2024-05-01T{h:02}:00")).collect();
        payload(json!({
            "hourly": { "time": times, "precipitation_probability": precip }
        }))
    }

    #[test]
    fn round_matches_half_up_convention() {
        assert_eq!(round(Some(2.5)), Some(3));
        assert_eq!(round(Some(-2.5)), Some(-2));
        assert_eq!(round(Some(-2.6)), Some(-3));
        assert_eq!(round(Some(-0.4)), Some(0));
        assert_eq!(round(Some(17.49)), Some(17));
        assert_eq!(round(Some(0.499_999_999_999_999_94)), Some(0));
        assert_eq!(round(Some(71.0)), Some(71));
    }

    #[test]
    fn round_rejects_missing_and_non_finite() {
        assert_eq!(round(None), None);
        assert_eq!(round(Some(f64::NAN)), None);
        assert_eq!(round(Some(f64::INFINITY)), None);
        assert_eq!(round(Some(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn round_rejects_values_beyond_i64() {
        assert_eq!(round(Some(1e20)), None);
        assert_eq!(round(Some(-1e20)), None);
        assert_eq!(round(Some(9.3e18)), None);
        assert_eq!(round(Some(2f64.powi(63))), None);
        assert_eq!(round(Some(-(2f64.powi(63)))), Some(i64::MIN));
        assert_eq!(round(Some(4.5e15)), Some(4_500_000_000_000_000));
    }

    #[test]
    fn empty_payload_yields_empty_model() {
        let before = Utc::now();
        let model = normalize(&amsterdam(), &RawForecastPayload::default());

        assert!(model.hourly.is_empty());
        assert!(model.daily.is_empty());
        assert_eq!(model.current, CurrentConditions::default());
        assert_eq!(model.next_rain_hour, None);
        assert_eq!(model.timezone, None);
        assert_eq!(model.sky, SkyTheme::Clear);

        let updated = DateTime::parse_from_rfc3339(&model.last_updated)
            .expect("fallback timestamp should be RFC 3339")
            .with_timezone(&Utc);
        let elapsed = updated.signed_duration_since(before).num_milliseconds();
        assert!((-1..5_000).contains(&elapsed), "elapsed {elapsed}ms");
    }

    #[test]
    fn last_updated_prefers_current_time() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .expect("valid")
            .with_timezone(&Utc);

        let with_time = payload(json!({ "current": { "time": "2024-05-01T14:00" } }));
        assert_eq!(normalize_at(&amsterdam(), &with_time, now).last_updated, "2024-05-01T14:00");

        let empty_time = payload(json!({ "current": { "time": "" } }));
        assert_eq!(
            normalize_at(&amsterdam(), &empty_time, now).last_updated,
            "2024-05-01T12:00:00.000Z"
        );
    }

    #[test]
    fn next_rain_hour_keeps_first_maximum() {
        let model = normalize(&amsterdam(), &hourly_with_precip(json!([10, 0, 40, 40, null])));
        let rain = model.next_rain_hour.expect("rain hour expected");

        assert_eq!(rain.time.as_deref(), Some("2024-05-01T02:00"));
        assert_eq!(rain.precipitation_probability, Some(40.0));
    }

    #[test]
    fn next_rain_hour_absent_when_dry() {
        let model = normalize(&amsterdam(), &hourly_with_precip(json!([0, null, 0, 0])));
        assert_eq!(model.next_rain_hour, None);

        let model = normalize(&amsterdam(), &hourly_with_precip(json!([])));
        assert_eq!(model.next_rain_hour, None);
    }

    #[test]
    fn next_rain_hour_only_sees_truncated_hours() {
        let mut precip = vec![json!(0); 12];
        precip[9] = json!(90);
        let model = normalize(&amsterdam(), &hourly_with_precip(json!(precip)));

        assert_eq!(model.hourly.len(), HOURLY_LIMIT);
        assert_eq!(model.next_rain_hour, None);
    }

    #[test]
    fn hourly_is_truncated_and_tolerates_short_series() {
        let raw = payload(json!({
            "hourly": {
                "time": (0..10).map(|h| format!("2024-05-01T{h:02}:00")).collect::<Vec<_>>(),
                "temperature_2m": [10.4, 10.5, -0.5],
                "uv_index": [0.25],
                "wind_speed_10m": [3.3, null, 4.4]
            }
        }));
        let model = normalize(&amsterdam(), &raw);

        assert_eq!(model.hourly.len(), 8);
        let temps: Vec<_> = model.hourly.iter().map(|h| h.temperature).collect();
        assert_eq!(temps[..4], [Some(10), Some(11), Some(0), None]);
        assert_eq!(model.hourly[0].uv, Some(0.25));
        assert_eq!(model.hourly[1].uv, None);
        assert_eq!(model.hourly[1].wind, None);
        assert_eq!(model.hourly[2].wind, Some(4.4));
        assert_eq!(model.hourly[7].time.as_deref(), Some("2024-05-01T07:00"));
    }

    #[test]
    fn daily_keeps_first_five_days_aligned() {
        let raw = payload(json!({
            "daily": {
                "time": ["d0", "d1", "d2", "d3", "d4", "d5", "d6"],
                "temperature_2m_min": [1.2, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0],
                "temperature_2m_max": [11.0, 12.0, 13.0, 14.0, 15.5, 16.0, 17.0],
                "weathercode": [0, 3, 61, 71, 95, 2, 1],
                "uv_index_max": [1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5],
                "sunrise": ["r0", "r1", "r2", "r3", "r4", "r5", "r6"],
                "sunset": ["s0", "s1", "s2", "s3", "s4", "s5", "s6"],
                "precipitation_probability_max": [0, 10, 20, 30, 40, 50, 60]
            }
        }));
        let model = normalize(&amsterdam(), &raw);

        assert_eq!(model.daily.len(), 5);
        for (i, day) in model.daily.iter().enumerate() {
            assert_eq!(day.date, Some(format!("d{i}")));
            assert_eq!(day.sunrise, Some(format!("r{i}")));
            assert_eq!(day.sunset, Some(format!("s{i}")));
            assert_eq!(day.precipitation_probability, Some(10.0 * i as f64));
            assert_eq!(day.uv, Some(1.5 + i as f64));
        }
        assert_eq!(model.daily[1].min, Some(3));
        assert_eq!(model.daily[4].max, Some(16));
        assert_eq!(model.daily[4].code, Some(95));
    }

    #[test]
    fn current_block_is_rounded_and_code_passes_through() {
        let raw = payload(json!({
            "timezone": "Europe/Amsterdam",
            "current": {
                "temperature_2m": 17.5,
                "apparent_temperature": 16.2,
                "relative_humidity_2m": 71,
                "precipitation": 0.4,
                "wind_speed_10m": 12.6,
                "weather_code": 95,
                "uv_index": 4.5
            }
        }));
        let model = normalize(&amsterdam(), &raw);

        assert_eq!(
            model.current,
            CurrentConditions {
                temperature: Some(18),
                feels_like: Some(16),
                humidity: Some(71),
                precipitation: Some(0),
                wind: Some(13),
                code: Some(95),
                uv: Some(5),
            }
        );
        assert_eq!(model.sky, SkyTheme::Storm);
        assert_eq!(model.timezone.as_deref(), Some("Europe/Amsterdam"));
    }

    #[test]
    fn location_summary_formats_coordinates() {
        let model = normalize(&amsterdam(), &RawForecastPayload::default());

        assert_eq!(model.location.coordinates, "52.37, 4.89");
        assert_eq!(model.location.name, "Amsterdam");
        assert_eq!(model.location.region.as_deref(), Some("North Holland"));
        assert_eq!(format_coordinates(-33.8688, 151.2093), "-33.87, 151.21");
    }
}
