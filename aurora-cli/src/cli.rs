use anyhow::Context;
use aurora_core::{Config, WeatherModel, WeatherService, config::MAX_FORECAST_DAYS};
use clap::{Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Text, validator::Validation};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "aurora", version, about = "Search a city, get a clear forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Print the normalized model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for a coordinate pair.
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Print the normalized model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List places matching a partial name.
    Suggest {
        query: String,
    },

    /// Interactively set the default city and forecast horizon.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        debug!(?config, "Loaded configuration");

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { city, json } => {
                let service = WeatherService::open_meteo(&config)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());
                let model = service.by_city(&city).await?;
                print_model(&model, json)?;
            }
            Command::Locate { lat, lon, json } => {
                let service = WeatherService::open_meteo(&config)?;
                let model = service.by_coordinates(lat, lon).await?;
                print_model(&model, json)?;
            }
            Command::Suggest { query } => {
                let service = WeatherService::open_meteo(&config)?;
                let suggestions = service.suggest(&query).await?;
                print!("{}", render::suggestions(&suggestions));
            }
        }

        Ok(())
    }
}

fn print_model(model: &WeatherModel, json: bool) -> anyhow::Result<()> {
    if json {
        let out =
            serde_json::to_string_pretty(model).context("Failed to serialize weather model")?;
        println!("{out}");
    } else {
        print!("{}", render::weather(model));
    }
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city)?;

    config.forecast_days = CustomType::<u8>::new("Forecast days (1-16):")
        .with_default(config.effective_forecast_days())
        .with_error_message("Please enter a whole number between 1 and 16")
        .with_validator(validate_forecast_days)
        .prompt()
        .context("Failed to read forecast days")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    println!(
        "Default city: {}, forecast days: {}",
        config.default_city,
        config.effective_forecast_days()
    );

    Ok(())
}

fn validate_forecast_days(days: &u8) -> Result<Validation, CustomUserError> {
    if (1..=MAX_FORECAST_DAYS).contains(days) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            format!("Forecast days must be between 1 and {MAX_FORECAST_DAYS}").into(),
        ))
    }
}
