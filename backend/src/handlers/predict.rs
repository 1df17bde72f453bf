//! HTTP handler for the image upload and prediction endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use shared::{validate_coordinates, DetectionResult, GpsCoordinates};

use crate::services::{DetectionPipeline, WeatherService};
use crate::AppState;

/// Result view for one prediction request.
///
/// Always rendered with HTTP 200: a failed request carries its message in
/// `error` with no detections, mirroring what the result page shows.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub detections: Vec<DetectionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            detections: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Fields accepted by the upload form
#[derive(Debug, Default)]
struct UploadForm {
    image: Option<Vec<u8>>,
    latitude: Option<String>,
    longitude: Option<String>,
}

/// Run detection over an uploaded image
pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<PredictResponse> {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(message) => return Json(PredictResponse::error(message)),
    };

    let image = match form.image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Json(PredictResponse::error("No file selected.")),
    };

    let weather = match parse_coordinates(form.latitude.as_deref(), form.longitude.as_deref()) {
        Some(location) => {
            WeatherService::new(state.weather.clone())
                .observe(location)
                .await
        }
        None => None,
    };

    let pipeline = DetectionPipeline::new(state.db.clone(), state.inference.clone());
    let threshold = state.config.detection.confidence_threshold;

    match pipeline.run(&image, threshold, weather).await {
        Ok(detections) => Json(PredictResponse {
            detections,
            error: None,
        }),
        Err(e) => {
            tracing::error!("Error during prediction: {}", e);
            Json(PredictResponse::error(format!("An error occurred: {}", e)))
        }
    }
}

/// Drain the multipart form into the fields the endpoint understands
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Malformed upload: {}", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                // An empty filename means the browser submitted no selection
                if field.file_name().is_some_and(|name| name.is_empty()) {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read upload: {}", e))?;
                form.image = Some(bytes.to_vec());
            }
            Some("latitude") => form.latitude = field.text().await.ok(),
            Some("longitude") => form.longitude = field.text().await.ok(),
            _ => {}
        }
    }

    Ok(form)
}

/// Coordinates are optional; anything unparseable or off-globe counts as absent
fn parse_coordinates(latitude: Option<&str>, longitude: Option<&str>) -> Option<GpsCoordinates> {
    let latitude: f64 = latitude?.trim().parse().ok()?;
    let longitude: f64 = longitude?.trim().parse().ok()?;

    match validate_coordinates(latitude, longitude) {
        Ok(()) => Some(GpsCoordinates::new(latitude, longitude)),
        Err(reason) => {
            tracing::warn!("Ignoring supplied coordinates: {}", reason);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::config::{Config, DatabaseConfig, DetectionConfig, ServerConfig, WeatherConfig};
    use crate::external::InferenceClient;
    use crate::services::HistoryService;
    use crate::AppState;

    const BOUNDARY: &str = "pda-test-boundary";

    async fn test_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations");

        let config = Config {
            environment: "test".to_string(),
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            detection: DetectionConfig {
                api_endpoint: "http://127.0.0.1:9/detect".to_string(),
                api_key: "test-key".to_string(),
                confidence_threshold: 0.25,
            },
            weather: WeatherConfig {
                api_key: String::new(),
                timeout_secs: 5,
            },
        };

        AppState {
            db: pool,
            config: Arc::new(config),
            inference: InferenceClient::new(
                "http://127.0.0.1:9/detect".to_string(),
                "test-key".to_string(),
            ),
            weather: None,
        }
    }

    fn text_part(name: &str, value: &str) -> String {
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
    }

    fn file_part(filename: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
        )
    }

    fn multipart_request(parts: &[String]) -> Request<Body> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        Request::builder()
            .method("POST")
            .uri("/api/v1/predict")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_view(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_without_file_is_an_error_view() {
        let state = test_state().await;
        let pool = state.db.clone();
        let app = crate::create_app(state);

        let request = multipart_request(&[text_part("latitude", "5.9496")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = response_view(response).await;
        assert_eq!(view["error"], "No file selected.");
        assert!(view["detections"].as_array().unwrap().is_empty());

        // Nothing was persisted for the failed attempt
        assert!(HistoryService::new(pool).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename_is_an_error_view() {
        let state = test_state().await;
        let app = crate::create_app(state);

        let request = multipart_request(&[file_part("", "")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = response_view(response).await;
        assert_eq!(view["error"], "No file selected.");
    }

    #[tokio::test]
    async fn test_unreachable_inference_service_is_a_pipeline_error_view() {
        let state = test_state().await;
        let pool = state.db.clone();
        let app = crate::create_app(state);

        let request = multipart_request(&[file_part("leaf.png", "not-really-a-png")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = response_view(response).await;
        let message = view["error"].as_str().unwrap();
        assert!(message.starts_with("An error occurred:"), "{message}");
        assert!(view["detections"].as_array().unwrap().is_empty());

        assert!(HistoryService::new(pool).list().await.unwrap().is_empty());
    }

    #[test]
    fn test_coordinates_require_both_fields() {
        assert!(parse_coordinates(Some("5.9496"), Some("80.4521")).is_some());
        assert!(parse_coordinates(Some("5.9496"), None).is_none());
        assert!(parse_coordinates(None, Some("80.4521")).is_none());
        assert!(parse_coordinates(None, None).is_none());
    }

    #[test]
    fn test_unparseable_coordinates_are_absent() {
        assert!(parse_coordinates(Some(""), Some("80.4521")).is_none());
        assert!(parse_coordinates(Some("north"), Some("80.4521")).is_none());
    }

    #[test]
    fn test_off_globe_coordinates_are_absent() {
        assert!(parse_coordinates(Some("95.0"), Some("80.4521")).is_none());
        assert!(parse_coordinates(Some("5.9496"), Some("200.0")).is_none());
    }
}
