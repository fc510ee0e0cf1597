use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::FetchError,
    model::{CityWeatherView, ForecastView, RawWeatherResponse},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<(StatusCode, T), FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(endpoint, city, error = %e, "OpenWeather request failed");
                FetchError::transport(&e)
            })?;

        let status = res.status();

        if !status.is_success() {
            tracing::debug!(endpoint, city, %status, "OpenWeather returned an error status");
            return Err(FetchError::from_status(status));
        }

        let body = res.text().await.map_err(|e| FetchError::Decode {
            status: status.as_u16(),
            message: format!("Failed to read OpenWeather {endpoint} response body: {e}"),
        })?;

        let parsed = serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            status: status.as_u16(),
            message: format!("Failed to parse OpenWeather {endpoint} JSON: {e}"),
        })?;

        Ok((status, parsed))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<CityWeatherView, FetchError> {
        let (status, raw) = self.get_json::<RawWeatherResponse>("weather", city).await?;

        transform(raw, fetch_stamp()).ok_or_else(|| FetchError::Decode {
            status: status.as_u16(),
            message: "OpenWeather response contained no weather conditions".to_string(),
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastView, FetchError> {
        let (_, forecast) = self.get_json::<ForecastView>("forecast", city).await?;
        Ok(forecast)
    }
}

/// Map a provider payload onto the view record.
///
/// Temperature is rounded half away from zero. Returns `None` when the
/// payload carries no condition descriptor.
pub fn transform(raw: RawWeatherResponse, stamp: i64) -> Option<CityWeatherView> {
    let condition = raw.weather.into_iter().next()?;

    Some(CityWeatherView {
        id: format!("{}-{}", raw.id, stamp),
        city: raw.name,
        temperature: raw.main.temp.round() as i64,
        condition: condition.main,
        description: condition.description,
        icon: condition.icon,
        country: raw.sys.country,
        humidity_pct: raw.main.humidity,
        wind_speed: raw.wind.speed,
    })
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp, bumped so consecutive calls never repeat.
fn fetch_stamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_STAMP
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);

    now.max(prev + 1)
}
