//! Append-only detection history log

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shared::{HistoryEntry, RiskTier};

use crate::error::AppResult;

/// Service for writing and reading the detection history log
#[derive(Clone)]
pub struct HistoryService {
    db: SqlitePool,
}

/// Input for appending one history row
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub detected_class: String,
    pub confidence: f64,
    pub risk_score: RiskTier,
    pub recommendation_given: String,
}

/// Database row for a history entry
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    timestamp: DateTime<Utc>,
    detected_class: String,
    confidence: f64,
    risk_score: String,
    recommendation_given: String,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            id: row.id,
            timestamp: row.timestamp,
            detected_class: row.detected_class,
            confidence: row.confidence,
            risk_score: RiskTier::parse(&row.risk_score),
            recommendation_given: row.recommendation_given,
        }
    }
}

impl HistoryService {
    /// Create a new HistoryService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Append one row; the timestamp is assigned by the store.
    ///
    /// Rows are never updated or deleted afterwards.
    pub async fn record(&self, entry: &NewHistoryEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO history (detected_class, confidence, risk_score, recommendation_given)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&entry.detected_class)
        .bind(entry.confidence)
        .bind(entry.risk_score.as_str())
        .bind(&entry.recommendation_given)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// All history rows, newest first.
    ///
    /// The store timestamp has second resolution, so rows written by one
    /// request can tie; id breaks the tie.
    pub async fn list(&self) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, timestamp, detected_class, confidence, risk_score, recommendation_given
            FROM history
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
