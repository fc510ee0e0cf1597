use serde::{Deserialize, Serialize};

/// Current-conditions payload as returned by OpenWeather `/weather`.
///
/// Only the fields the transform reads are required; the rest default when
/// a provider response omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeatherResponse {
    pub id: u64,
    pub name: String,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
    #[serde(default)]
    pub clouds: RawClouds,
    pub sys: RawSys,
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub cod: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    /// Percent; OpenWeather always sends an integer.
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClouds {
    #[serde(default)]
    pub all: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// UI-ready weather record for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeatherView {
    /// `"{provider id}-{fetch timestamp}"`, unique per fetch attempt.
    pub id: String,
    pub city: String,
    pub temperature: i64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub country: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

/// What a dashboard card currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CardState {
    Loading,
    Ready(CityWeatherView),
    Failed(String),
}

impl CardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CardState::Loading)
    }

    pub fn view(&self) -> Option<&CityWeatherView> {
        match self {
            CardState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CardState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Forecast payload from OpenWeather `/forecast`, passed through as decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<ForecastCondition>,
    #[serde(default)]
    pub dt_txt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
}
