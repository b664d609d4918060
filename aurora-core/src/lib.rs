//! Core library for the `aurora` weather lookup.
//!
//! This crate defines:
//! - The forecast normalizer and weather-code tables
//! - Shared domain models (locations, raw payloads, display models)
//! - Geocoding and forecast collaborators, with an Open-Meteo implementation
//! - Configuration handling
//!
//! It is used by `aurora-cli`, but can also be reused by other front ends.

pub mod codes;
pub mod config;
pub mod display;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;

pub use codes::{SkyTheme, classify_sky, describe_code, describe_code_or_fallback, icon_for_code};
pub use config::Config;
pub use model::{Location, RawForecastPayload, WeatherModel};
pub use normalize::{normalize, normalize_at};
pub use provider::{ForecastSource, Geocoder, OpenMeteo};
pub use service::{LookupError, Suggestion, WeatherService};
