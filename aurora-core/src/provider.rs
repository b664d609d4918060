use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{Location, RawForecastPayload};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// Resolves place names and coordinates into [`Location`]s.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Up to `count` candidates for a free-text query, best match first.
    async fn search(&self, query: &str, count: u8) -> anyhow::Result<Vec<Location>>;

    /// Candidates near a coordinate pair, best match first.
    async fn reverse(&self, latitude: f64, longitude: f64) -> anyhow::Result<Vec<Location>>;
}

/// Fetches the raw forecast for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, location: &Location) -> anyhow::Result<RawForecastPayload>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
