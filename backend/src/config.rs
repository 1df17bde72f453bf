//! Configuration management for the Plant Disease Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PDA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Detection inference service configuration
    pub detection: DetectionConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectionConfig {
    /// Inference service endpoint
    pub api_endpoint: String,

    /// Inference service API key
    pub api_key: String,

    /// Confidence threshold passed to the model for every prediction
    pub confidence_threshold: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API key; leave empty to disable weather enrichment
    pub api_key: String,

    /// Request timeout for weather lookups, in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PDA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "sqlite:advisory.db")?
            .set_default("database.max_connections", 5)?
            .set_default("detection.confidence_threshold", 0.25)?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PDA_ prefix)
            .add_source(
                Environment::with_prefix("PDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
