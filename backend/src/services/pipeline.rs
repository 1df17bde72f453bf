//! Detection pipeline orchestration

use sqlx::SqlitePool;

use shared::{normalize_label, DetectedBox, DetectionResult, WeatherCondition, WeatherObservation};

use crate::error::AppResult;
use crate::external::InferenceClient;
use crate::services::advice::AdviceService;
use crate::services::history::{HistoryService, NewHistoryEntry};

/// Orchestrates model invocation, recommendation lookup, and history logging
#[derive(Clone)]
pub struct DetectionPipeline {
    inference: InferenceClient,
    advice: AdviceService,
    history: HistoryService,
}

impl DetectionPipeline {
    /// Create a pipeline over the shared pool and the startup-built client
    pub fn new(db: SqlitePool, inference: InferenceClient) -> Self {
        Self {
            inference,
            advice: AdviceService::new(db.clone()),
            history: HistoryService::new(db),
        }
    }

    /// Run detection over an image and resolve advice for every box.
    ///
    /// An inference failure fails the whole run: no partial results, nothing
    /// persisted for the attempt.
    pub async fn run(
        &self,
        image: &[u8],
        confidence_threshold: f32,
        weather: Option<WeatherObservation>,
    ) -> AppResult<Vec<DetectionResult>> {
        let boxes = self.inference.detect(image, confidence_threshold).await?;
        self.process_boxes(boxes, weather).await
    }

    /// Resolve and log each detected box, preserving model order.
    ///
    /// The whole image shares one weather condition. History writes are
    /// fire-and-forget: a failed insert is logged and the remaining
    /// detections still go through.
    pub async fn process_boxes(
        &self,
        boxes: Vec<DetectedBox>,
        weather: Option<WeatherObservation>,
    ) -> AppResult<Vec<DetectionResult>> {
        let condition = weather
            .map(|w| w.condition)
            .unwrap_or(WeatherCondition::Any);

        let mut results = Vec::with_capacity(boxes.len());
        for detected in boxes {
            let diagnosis = normalize_label(&detected.label);
            let advice = self
                .advice
                .resolve(&diagnosis.disease, diagnosis.severity, condition)
                .await?;

            let result = DetectionResult {
                class_name: detected.label,
                confidence_percent: (detected.confidence * 100.0) as i32,
                recommendation: advice.text,
                risk: advice.risk,
                weather,
            };

            let entry = NewHistoryEntry {
                detected_class: result.class_name.clone(),
                confidence: f64::from(result.confidence_percent) / 100.0,
                risk_score: result.risk,
                recommendation_given: result.recommendation.clone(),
            };
            if let Err(e) = self.history.record(&entry).await {
                tracing::error!("Failed to save detection to history: {}", e);
            }

            results.push(result);
        }

        Ok(results)
    }
}
