use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::{
    CityListStore, Config, Dashboard, FileStore, KeyValueStore, cities::same_city, dashboard,
    source_from_config,
};
use inquire::{Confirm, Password, Text};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key.
    Configure,

    /// Fetch a city's weather and add it to the saved list.
    Add {
        /// City name, e.g. "London".
        city: String,
    },

    /// Remove a city from the saved list.
    Remove {
        /// City name exactly as listed.
        city: String,
    },

    /// List saved cities.
    List,

    /// Remove all saved cities.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Show current weather for every saved city.
    Show,

    /// Show the 5-day forecast for a city.
    Forecast {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        tracing::debug!(command = ?self.command, configured = config.is_configured(), "Running command");

        match self.command {
            Command::Configure => configure(config)?,
            Command::Add { city } => {
                let source = source_from_config(&config)?;
                let mut cities = city_store(&config)?;
                let mut dash = Dashboard::new();

                dashboard::add_city(&mut dash, &mut cities, source.as_ref(), &city).await;
                output::print_cards(dash.cards());
            }
            Command::Remove { city } => {
                let mut cities = city_store(&config)?;
                if remove_saved(&mut cities, &city) {
                    println!("Removed {city}");
                } else {
                    println!("{city} is not in the saved list.");
                }
            }
            Command::List => {
                let cities = city_store(&config)?.list();
                if cities.is_empty() {
                    println!("No saved cities. Add one with `weather-dashboard add <city>`.");
                }
                for city in cities {
                    println!("{city}");
                }
            }
            Command::Clear { yes } => {
                let confirmed = yes
                    || Confirm::new("Are you sure you want to remove all cities?")
                        .with_default(false)
                        .prompt()
                        .context("Failed to read confirmation")?;

                if confirmed {
                    city_store(&config)?.clear();
                    println!("All cities removed.");
                }
            }
            Command::Show => {
                let source = source_from_config(&config)?;
                let mut cities = city_store(&config)?;
                let mut dash = Dashboard::new();

                dashboard::load_saved(&mut dash, &mut cities, source).await;

                if dash.cards().is_empty() {
                    println!("No saved cities. Add one with `weather-dashboard add <city>`.");
                }
                output::print_cards(dash.cards());
            }
            Command::Forecast { city } => {
                let source = source_from_config(&config)?;
                match source.fetch_forecast(&city).await {
                    Ok(forecast) => output::print_forecast(&forecast),
                    Err(err) => eprintln!("{err}"),
                }
            }
        }

        Ok(())
    }
}

fn city_store(config: &Config) -> anyhow::Result<CityListStore<FileStore>> {
    Ok(CityListStore::new(config.file_store()?))
}

/// Remove `city` if it is saved. Returns whether anything matched.
fn remove_saved<S: KeyValueStore>(cities: &mut CityListStore<S>, city: &str) -> bool {
    if !cities.list().iter().any(|c| same_city(c, city)) {
        return false;
    }

    cities.remove(city);
    true
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = Some(base_url.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
