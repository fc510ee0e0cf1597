use crate::{
    Config, CityWeatherView, FetchError, ForecastView, provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A source of current conditions and forecasts for a named city.
///
/// Implementations never fail past this boundary with anything but a
/// classified [`FetchError`].
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CityWeatherView, FetchError>;

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastView, FetchError>;
}

/// Construct the OpenWeather client from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `weather-dashboard configure` and enter your OpenWeather API key."
        )
    })?;

    let client = OpenWeatherClient::with_base_url(api_key.to_owned(), config.base_url());

    Ok(Arc::new(client))
}
