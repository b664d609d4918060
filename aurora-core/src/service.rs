//! Geocode, fetch, normalize.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    Config,
    model::{Location, RawForecastPayload, WeatherModel},
    normalize::{format_coordinates, normalize},
    provider::{ForecastSource, Geocoder, OpenMeteo},
};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced to the user. Messages are meant to be shown as-is.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a city to explore.")]
    EmptyQuery,

    #[error("City not found. Try another search.")]
    CityNotFound { query: String },

    #[error("Location lookup failed. Try typing a city.")]
    ReverseLookupFailed { latitude: f64, longitude: f64 },

    #[error("Could not fetch weather. Please retry.")]
    Upstream(#[source] BoxError),

    /// Upstream failure while looking up a coordinate pair.
    #[error("Location access failed. Please allow permission or type a city.")]
    LocationAccess(#[source] BoxError),
}

impl LookupError {
    fn upstream(err: anyhow::Error) -> Self {
        LookupError::Upstream(err.into())
    }

    fn location_access(err: anyhow::Error) -> Self {
        LookupError::LocationAccess(err.into())
    }
}

/// A geocoding candidate prepared for a picker list.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// "name, country"
    pub label: String,
    pub coordinates: String,
    pub location: Location,
}

impl From<Location> for Suggestion {
    fn from(location: Location) -> Self {
        Self {
            label: format!("{}, {}", location.name, location.country),
            coordinates: format_coordinates(location.latitude, location.longitude),
            location,
        }
    }
}

#[derive(Debug)]
pub struct WeatherService<G, F> {
    geocoder: G,
    forecasts: F,
    suggestion_count: u8,
}

impl WeatherService<OpenMeteo, OpenMeteo> {
    /// Service backed by Open-Meteo for both geocoding and forecasts.
    pub fn open_meteo(config: &Config) -> anyhow::Result<Self> {
        let client = OpenMeteo::new(config)?;
        Ok(Self::new(client.clone(), client, config.effective_suggestion_count()))
    }
}

impl<G: Geocoder, F: ForecastSource> WeatherService<G, F> {
    pub fn new(geocoder: G, forecasts: F, suggestion_count: u8) -> Self {
        Self { geocoder, forecasts, suggestion_count }
    }

    /// Weather for the best geocoding match of `query`.
    pub async fn by_city(&self, query: &str) -> Result<WeatherModel, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let location = self
            .geocoder
            .search(query, 1)
            .await
            .map_err(LookupError::upstream)?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::CityNotFound { query: query.to_string() })?;

        info!(query, name = %location.name, country = %location.country, "Resolved city");
        let payload =
            self.forecasts.forecast(&location).await.map_err(LookupError::upstream)?;
        Ok(self.normalized(&location, &payload))
    }

    /// Weather at a coordinate pair, presented as the nearest known place.
    pub async fn by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherModel, LookupError> {
        let place = self
            .geocoder
            .reverse(latitude, longitude)
            .await
            .map_err(LookupError::location_access)?
            .into_iter()
            .next()
            .ok_or(LookupError::ReverseLookupFailed { latitude, longitude })?;

        info!(latitude, longitude, name = %place.name, "Resolved coordinates");

        // Forecast for the exact point; the model describes the resolved place.
        let point = Location { latitude, longitude, ..place.clone() };
        let payload =
            self.forecasts.forecast(&point).await.map_err(LookupError::location_access)?;
        Ok(self.normalized(&place, &payload))
    }

    /// Candidates for an autocomplete list. Blank queries yield nothing.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .geocoder
            .search(query, self.suggestion_count)
            .await
            .map_err(LookupError::upstream)?;

        Ok(candidates.into_iter().map(Suggestion::from).collect())
    }

    fn normalized(&self, location: &Location, payload: &RawForecastPayload) -> WeatherModel {
        let model = normalize(location, payload);

        debug!(
            hourly = model.hourly.len(),
            daily = model.daily.len(),
            sky = %model.sky,
            "Normalized forecast"
        );
        model
    }
}
