//! Recommendation resolution against the static advice table

use sqlx::SqlitePool;

use shared::{Advice, RiskTier, Severity, WeatherCondition};

use crate::error::AppResult;

/// Resolves recommendations from the seeded advice rules
#[derive(Clone)]
pub struct AdviceService {
    db: SqlitePool,
}

/// Database row for an advice rule hit
#[derive(Debug, sqlx::FromRow)]
struct AdviceRow {
    recommendation_text: String,
    risk_score: String,
}

impl From<AdviceRow> for Advice {
    fn from(row: AdviceRow) -> Self {
        Advice {
            text: row.recommendation_text,
            risk: RiskTier::parse(&row.risk_score),
        }
    }
}

impl AdviceService {
    /// Create a new AdviceService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Look up guidance for a (disease, severity, weather) key.
    ///
    /// Lookup is two-tiered: an exact match on the weather condition first,
    /// then the weather-agnostic "Any" row. When neither exists the constant
    /// unknown-advice fallback is returned; a lookup miss is not an error.
    pub async fn resolve(
        &self,
        disease: &str,
        severity: Severity,
        condition: WeatherCondition,
    ) -> AppResult<Advice> {
        if let Some(row) = self.lookup(disease, severity, condition.as_str()).await? {
            return Ok(row.into());
        }

        if condition != WeatherCondition::Any {
            if let Some(row) = self
                .lookup(disease, severity, WeatherCondition::Any.as_str())
                .await?
            {
                return Ok(row.into());
            }
        }

        Ok(Advice::unknown())
    }

    /// First matching rule for the exact key, by insertion order
    async fn lookup(
        &self,
        disease: &str,
        severity: Severity,
        condition: &str,
    ) -> AppResult<Option<AdviceRow>> {
        let row = sqlx::query_as::<_, AdviceRow>(
            r#"
            SELECT recommendation_text, risk_score
            FROM advice
            WHERE disease_name = ?1 AND severity = ?2 AND weather_condition = ?3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(disease)
        .bind(severity.as_str())
        .bind(condition)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}
