//! Detection Inference Client
//!
//! Client for the hosted inference microservice that runs the pretrained
//! symptom-detection model.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::DetectedBox;

use crate::error::{AppError, AppResult};

/// Client for the detection inference microservice
#[derive(Clone)]
pub struct InferenceClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Request to detect disease symptoms in an image
#[derive(Debug, Serialize)]
pub struct DetectRequest {
    pub image_base64: String,
    pub confidence_threshold: f32,
}

/// Response from the detection API
#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    pub request_id: String,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub processing_time_ms: Option<i32>,
    pub boxes: Vec<BoxResponse>,
}

/// One detected box from the API
#[derive(Debug, Deserialize)]
pub struct BoxResponse {
    pub label: String,
    pub confidence: f32,
}

impl From<BoxResponse> for DetectedBox {
    fn from(r: BoxResponse) -> Self {
        DetectedBox {
            label: r.label,
            confidence: r.confidence,
        }
    }
}

impl InferenceClient {
    /// Create a new inference client
    pub fn new(api_endpoint: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Run the symptom model over an image.
    ///
    /// Boxes come back in the order the model emitted them. A failure here
    /// covers the whole image: corrupt input, decode failures, and internal
    /// model errors are all reported by the service as non-success responses.
    pub async fn detect(
        &self,
        image: &[u8],
        confidence_threshold: f32,
    ) -> AppResult<Vec<DetectedBox>> {
        let request = DetectRequest {
            image_base64: BASE64.encode(image),
            confidence_threshold,
        };

        let response = self
            .http_client
            .post(&self.api_endpoint)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::InferenceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::InferenceError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: DetectResponse = response
            .json()
            .await
            .map_err(|e| AppError::InferenceError(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            request_id = %result.request_id,
            model_version = ?result.model_version,
            processing_time_ms = ?result.processing_time_ms,
            boxes = result.boxes.len(),
            "Inference completed"
        );

        Ok(result.boxes.into_iter().map(DetectedBox::from).collect())
    }
}
