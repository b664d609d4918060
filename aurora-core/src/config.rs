use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_CITY: &str = "Amsterdam";
pub const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com";

/// The forecast API serves at most 16 days.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Top-level configuration stored on disk. Every key is optional.
///
/// Example TOML:
/// default_city = "Amsterdam"
/// forecast_days = 7
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City shown when no query is given.
    pub default_city: String,
    /// Language for geocoding results.
    pub language: String,
    pub forecast_days: u8,
    /// Number of candidates returned by `suggest`.
    pub suggestion_count: u8,
    pub timeout_secs: u64,
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            language: "en".to_string(),
            forecast_days: 7,
            suggestion_count: 6,
            timeout_secs: 10,
            geocoding_url: OPEN_METEO_GEOCODING_URL.to_string(),
            forecast_url: OPEN_METEO_FORECAST_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "aurora", "aurora-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the default city. Blank names are rejected.
    pub fn set_default_city(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(anyhow!("Default city must not be empty."));
        }
        self.default_city = city.to_string();
        Ok(())
    }

    /// Forecast horizon clamped to what the API accepts.
    pub fn effective_forecast_days(&self) -> u8 {
        self.forecast_days.clamp(1, MAX_FORECAST_DAYS)
    }

    pub fn effective_suggestion_count(&self) -> u8 {
        self.suggestion_count.max(1)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
