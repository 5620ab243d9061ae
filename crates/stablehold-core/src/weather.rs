//! Current conditions from OpenWeatherMap.
//!
//! The widget only decorates the page, so callers typically use
//! [`current_or_fallback`] and render a canned Lexington reading when the
//! provider is unavailable.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const LEXINGTON_LATITUDE: f64 = 38.0389;
pub const LEXINGTON_LONGITUDE: f64 = -84.5153;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather API key not configured")]
    MissingApiKey,

    /// HTTP 401 from the provider; new keys can take hours to activate.
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidApiKey,

    #[error("Weather API responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Weather request failed: {0}")]
    Request(String),

    #[error("Unexpected weather payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Request(err.to_string())
    }
}

/// Conditions shown in the widget, imperial units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temp: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub description: String,
    pub icon: String,
    pub city_name: String,
    pub timestamp: DateTime<Utc>,
    pub feels_like: f64,
}

impl WeatherReading {
    /// Typical spring afternoon in Lexington.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            temp: 68.5,
            wind_speed: 7.2,
            humidity: 65.0,
            pressure: 1015.0,
            description: "Partly cloudy".to_string(),
            icon: "02d".to_string(),
            city_name: "Lexington".to_string(),
            timestamp: now,
            feels_like: 70.2,
        }
    }
}

// Subset of the current-weather response.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    wind: OwmWind,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

impl OwmResponse {
    fn into_reading(self, now: DateTime<Utc>) -> WeatherReading {
        let condition = self.weather.into_iter().next();
        WeatherReading {
            temp: self.main.temp,
            wind_speed: self.wind.speed,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            description: condition
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Clear".to_string()),
            icon: condition
                .map(|c| c.icon)
                .unwrap_or_else(|| "01d".to_string()),
            city_name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Lexington".to_string()),
            timestamp: now,
            feels_like: self.main.feels_like,
        }
    }
}

/// Client for the current-weather endpoint at a fixed coordinate.
pub struct WeatherClient {
    base_url: String,
    api_key: Option<String>,
    latitude: f64,
    longitude: f64,
    http_client: Client,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            latitude: LEXINGTON_LATITUDE,
            longitude: LEXINGTON_LONGITUDE,
            http_client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Fetch current conditions; `now` stamps the reading.
    pub async fn current(&self, now: DateTime<Utc>) -> Result<WeatherReading, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        tracing::info!(
            latitude = self.latitude,
            longitude = self.longitude,
            "fetching current weather"
        );

        let resp = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "imperial".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let parsed: OwmResponse =
            serde_json::from_str(&text).map_err(|e| WeatherError::Malformed(e.to_string()))?;
        Ok(parsed.into_reading(now))
    }
}

/// Current conditions, or the canned reading if anything goes wrong.
pub async fn current_or_fallback(
    client: &WeatherClient,
    now: DateTime<Utc>,
) -> (WeatherReading, Option<WeatherError>) {
    match client.current(now).await {
        Ok(reading) => (reading, None),
        Err(e) => {
            tracing::warn!(error = %e, "using fallback weather data");
            (WeatherReading::fallback(now), Some(e))
        }
    }
}
