//! Plant Disease Advisory Platform - Backend Server
//!
//! Accepts uploaded leaf images, identifies disease symptoms through an
//! external detection service, and returns stored agronomic recommendations
//! adjusted for local weather conditions.

use axum::{routing::get, Router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{InferenceClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: Arc<Config>,
    pub inference: InferenceClient,
    pub weather: Option<WeatherClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pda_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Plant Disease Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    shared::validate_confidence_threshold(config.detection.confidence_threshold)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Migrations completed");

    // External clients are built once at startup and read-only afterwards
    let inference = InferenceClient::new(
        config.detection.api_endpoint.clone(),
        config.detection.api_key.clone(),
    );
    let weather = if config.weather.api_key.is_empty() {
        tracing::warn!("Weather API key not configured; detections will not be weather-adjusted");
        None
    } else {
        Some(WeatherClient::new(
            config.weather.api_key.clone(),
            config.weather.timeout_secs,
        ))
    };

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        inference,
        weather,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Plant Disease Advisory Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
