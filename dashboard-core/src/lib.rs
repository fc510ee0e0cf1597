//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - The OpenWeather fetch client and its view-record transform
//! - The saved-city list over a pluggable key-value store
//! - The dashboard reducer that applies fetch results by request id
//! - Configuration handling
//!
//! It is used by `dashboard-cli`, but can also be reused by other front-ends.

pub mod cities;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod storage;

pub use cities::{CITIES_KEY, CityListStore};
pub use config::Config;
pub use dashboard::{CityCard, Dashboard, FetchCompleted, RequestId};
pub use error::{FetchError, StorageError};
pub use model::{CardState, CityWeatherView, ForecastView, RawWeatherResponse};
pub use provider::{WeatherSource, openweather::OpenWeatherClient, source_from_config};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
