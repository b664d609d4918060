use serde::{Deserialize, Serialize};

use crate::codes::SkyTheme;

/// A resolved place, as returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// First-level administrative region (state, province).
    #[serde(default, rename = "admin1")]
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. "Europe/Amsterdam".
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Raw forecast response. Every block and every value is optional; values of
/// the wrong JSON type decode as absent instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecastPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<RawCurrent>,
    #[serde(default)]
    pub hourly: Option<RawHourly>,
    #[serde(default)]
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCurrent {
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
    #[serde(default, rename = "temperature_2m", deserialize_with = "lenient::number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub apparent_temperature: Option<f64>,
    #[serde(default, rename = "relative_humidity_2m", deserialize_with = "lenient::number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub precipitation: Option<f64>,
    #[serde(default, rename = "wind_speed_10m", deserialize_with = "lenient::number")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub weather_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub uv_index: Option<f64>,
}

/// Hourly series. Index `i` of every vector describes the same hour.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHourly {
    #[serde(default, deserialize_with = "lenient::texts")]
    pub time: Vec<Option<String>>,
    #[serde(default, rename = "temperature_2m", deserialize_with = "lenient::numbers")]
    pub temperature: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub uv_index: Vec<Option<f64>>,
    #[serde(default, rename = "wind_speed_10m", deserialize_with = "lenient::numbers")]
    pub wind_speed: Vec<Option<f64>>,
}

/// Daily series. Index `i` of every vector describes the same day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDaily {
    #[serde(default, deserialize_with = "lenient::texts")]
    pub time: Vec<Option<String>>,
    #[serde(default, rename = "temperature_2m_min", deserialize_with = "lenient::numbers")]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default, rename = "temperature_2m_max", deserialize_with = "lenient::numbers")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(default, rename = "weathercode", deserialize_with = "lenient::codes")]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub uv_index_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub sunrise: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub sunset: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

/// Display-ready snapshot built by [`crate::normalize::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherModel {
    pub timezone: Option<String>,
    pub location: LocationSummary,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    pub next_rain_hour: Option<HourlyEntry>,
    pub sky: SkyTheme,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    /// "lat, lon" with two decimals.
    pub coordinates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<i64>,
    pub feels_like: Option<i64>,
    pub humidity: Option<i64>,
    pub precipitation: Option<i64>,
    pub wind: Option<i64>,
    pub code: Option<i64>,
    pub uv: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: Option<String>,
    pub temperature: Option<i64>,
    pub precipitation_probability: Option<f64>,
    pub uv: Option<f64>,
    pub wind: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub code: Option<i64>,
    pub uv: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub precipitation_probability: Option<f64>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_code(value: &Value) -> Option<i64> {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    fn as_text(value: &Value) -> Option<String> {
        value.as_str().map(str::to_owned)
    }

    fn array<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => Ok(items),
            _ => Ok(Vec::new()),
        }
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_f64()))
    }

    pub fn code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.as_ref().and_then(as_code))
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.as_ref().and_then(as_text))
    }

    pub fn numbers<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(array(deserializer)?.iter().map(Value::as_f64).collect())
    }

    pub fn codes<'de, D>(deserializer: D) -> Result<Vec<Option<i64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(array(deserializer)?.iter().map(as_code).collect())
    }

    pub fn texts<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(array(deserializer)?.iter().map(as_text).collect())
    }
}
