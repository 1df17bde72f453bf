//! HTTP handler for the detection history view

use axum::{extract::State, Json};
use serde::Serialize;

use shared::{tally_detections, HistoryEntry};

use crate::error::AppResult;
use crate::services::HistoryService;
use crate::AppState;

/// History view: all rows newest first, plus aligned sequences for charting
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryEntry>,
    pub chart_labels: Vec<String>,
    pub chart_data: Vec<i64>,
}

/// List the detection history with tally data for charting
pub async fn history(State(state): State<AppState>) -> AppResult<Json<HistoryResponse>> {
    let service = HistoryService::new(state.db.clone());
    let records = service.list().await?;

    let (chart_labels, chart_data) =
        tally_detections(records.iter().map(|r| r.detected_class.as_str()));

    Ok(Json(HistoryResponse {
        records,
        chart_labels,
        chart_data,
    }))
}
