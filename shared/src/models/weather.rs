//! Weather reading and condition models

use serde::{Deserialize, Serialize};

/// A raw temperature/humidity reading from the weather provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

/// Coarse weather bucket used to select among recommendation rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    #[serde(rename = "High Humidity")]
    HighHumidity,
    #[serde(rename = "High Temp")]
    HighTemp,
    #[default]
    Any,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::HighHumidity => "High Humidity",
            WeatherCondition::HighTemp => "High Temp",
            WeatherCondition::Any => "Any",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a reading into a coarse condition bucket.
///
/// Humidity above 85% wins over temperature above 32°C when both hold.
pub fn classify_conditions(reading: &WeatherReading) -> WeatherCondition {
    if reading.humidity_percent > 85.0 {
        WeatherCondition::HighHumidity
    } else if reading.temperature_celsius > 32.0 {
        WeatherCondition::HighTemp
    } else {
        WeatherCondition::Any
    }
}

/// Weather snapshot attached to detection results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub condition: WeatherCondition,
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

impl From<WeatherReading> for WeatherObservation {
    fn from(reading: WeatherReading) -> Self {
        Self {
            condition: classify_conditions(&reading),
            temperature_celsius: reading.temperature_celsius,
            humidity_percent: reading.humidity_percent,
        }
    }
}
