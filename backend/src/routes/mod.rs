//! Route definitions for the Plant Disease Advisory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Image upload and detection
        .route("/predict", post(handlers::predict))
        // Detection history with chart tallies
        .route("/history", get(handlers::history))
}
