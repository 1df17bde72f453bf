//! Weather API client
//!
//! Integrates with OpenWeatherMap for current conditions at the upload's
//! coordinates.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherReading;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap current-weather response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, timeout_secs: u64, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions by GPS coordinates.
    ///
    /// The API credential travels in the query string, so transport errors
    /// are stripped of their URL before they reach any log line.
    pub async fn get_current(&self, latitude: f64, longitude: f64) -> AppResult<WeatherReading> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::WeatherUnavailable(format!("Request failed: {}", e.without_url()))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::WeatherUnavailable(format!("Failed to parse response: {}", e.without_url()))
        })?;

        Ok(WeatherReading {
            temperature_celsius: data.main.temp,
            humidity_percent: data.main.humidity,
        })
    }
}
