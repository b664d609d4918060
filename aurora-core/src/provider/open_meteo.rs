use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    Config,
    model::{Location, RawForecastPayload},
};

use super::{ForecastSource, Geocoder, truncate_body};

const CURRENT_FIELDS: &str = concat!(
    "temperature_2m,apparent_temperature,relative_humidity_2m,",
    "precipitation,weather_code,wind_speed_10m,uv_index"
);
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,uv_index,wind_speed_10m";
const DAILY_FIELDS: &str = concat!(
    "temperature_2m_max,temperature_2m_min,weathercode,uv_index_max,",
    "sunrise,sunset,precipitation_probability_max"
);

const USER_AGENT: &str = concat!("aurora-weather/", env!("CARGO_PKG_VERSION"));

/// Open-Meteo geocoding and forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
    forecast_days: u8,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Location>>,
}

impl OpenMeteo {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            forecast_days: config.effective_forecast_days(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(%url, ?query, "Requesting Open-Meteo {what}");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            warn!(%status, "Open-Meteo {what} request failed");
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
    }

    async fn geocode(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Location>> {
        let url = format!("{}{}", self.geocoding_url, path);
        let parsed: GeocodingResponse = self.get_json(what, &url, query).await?;
        let results = parsed.results.unwrap_or_default();

        debug!(candidates = results.len(), "Open-Meteo {what} answered");
        Ok(results)
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn search(&self, query: &str, count: u8) -> Result<Vec<Location>> {
        let params = [
            ("name", query.trim().to_string()),
            ("count", count.to_string()),
            ("language", self.language.clone()),
        ];
        self.geocode("geocoding", "/v1/search", &params).await
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("language", self.language.clone()),
        ];
        self.geocode("reverse geocoding", "/v1/reverse", &params).await
    }
}

#[async_trait]
impl ForecastSource for OpenMeteo {
    async fn forecast(&self, location: &Location) -> Result<RawForecastPayload> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let timezone = location.timezone.as_deref().unwrap_or("auto");

        let params = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("timezone", timezone.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ];
        self.get_json("forecast", &url, &params).await
    }
}
