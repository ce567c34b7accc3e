use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skycast_core::{
    CityTableResolver, Config, ForecastMode, GeocodingResolver, LocationResolver,
    OpenWeatherClient, WeatherQuery, WeatherService,
};

use crate::render::{self, DisplayOptions};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, free text.
        city: String,

        /// Number of forecast periods to display.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=40))]
        count: u8,

        /// Request daily forecast granularity. Degrades to the 3-hour
        /// forecast when the upstream no longer supports it.
        #[arg(long)]
        daily: bool,

        /// Resolve the city against a static CSV table (name,lat,lon)
        /// instead of remote geocoding. Skips the current-conditions card.
        #[arg(long, value_name = "FILE")]
        cities: Option<PathBuf>,

        /// Skip the map link.
        #[arg(long)]
        no_map: bool,

        /// Skip the humidity chart.
        #[arg(long)]
        no_humidity: bool,

        /// Skip the pressure chart.
        #[arg(long)]
        no_pressure: bool,

        /// Skip the temperature chart.
        #[arg(long)]
        no_temperature: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                count,
                daily,
                cities,
                no_map,
                no_humidity,
                no_pressure,
                no_temperature,
            } => {
                let opts = DisplayOptions {
                    count: count as usize,
                    show_map: !no_map,
                    show_humidity: !no_humidity,
                    show_pressure: !no_pressure,
                    show_temperature: !no_temperature,
                };

                show(city, daily, cities, opts).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    cfg.api_key = Some(key);
    cfg.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: String,
    daily: bool,
    cities: Option<PathBuf>,
    opts: DisplayOptions,
) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let api_key = cfg.require_api_key()?;
    let client = OpenWeatherClient::new(api_key.clone());

    // The static-table variant resolves offline and shows no current
    // conditions; the geocoding variant does both.
    let (resolver, with_current): (Box<dyn LocationResolver>, bool) = match &cities {
        Some(path) => (Box::new(CityTableResolver::from_csv_path(path)?), false),
        None => (Box::new(GeocodingResolver::new(api_key)), true),
    };

    let service = WeatherService::new(resolver, client);
    let mode = if daily { ForecastMode::Daily } else { ForecastMode::ThreeHour };
    let query = WeatherQuery { city, mode, with_current };

    println!("Fetching weather data for {}...", query.city);

    let report = service.lookup(&query).await?;
    print!("{}", render::render_report(&report, &opts));

    Ok(())
}
