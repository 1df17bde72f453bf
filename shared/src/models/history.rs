//! History log models and tallying

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RiskTier;

/// One row of the append-only detection history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub detected_class: String,
    pub confidence: f64,
    /// Snapshot of the risk tier the resolver returned at write time
    pub risk_score: RiskTier,
    /// Snapshot of the recommendation text given at write time
    pub recommendation_given: String,
}

/// Tally detected classes for charting.
///
/// Labels come back in first-seen order, counts aligned positionally.
pub fn tally_detections<'a, I>(classes: I) -> (Vec<String>, Vec<i64>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut labels: Vec<String> = Vec::new();
    let mut counts: Vec<i64> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for class in classes {
        match index.get(class) {
            Some(&slot) => counts[slot] += 1,
            None => {
                index.insert(class.to_string(), labels.len());
                labels.push(class.to_string());
                counts.push(1);
            }
        }
    }

    (labels, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_empty() {
        let empty: [&str; 0] = [];
        let (labels, counts) = tally_detections(empty);
        assert!(labels.is_empty());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_tally_preserves_first_seen_order() {
        let (labels, counts) = tally_detections(["a", "b", "a", "c"]);
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(counts, vec![2, 1, 1]);
    }

    #[test]
    fn test_tally_single_class() {
        let (labels, counts) = tally_detections(["wcwld_mild"; 4]);
        assert_eq!(labels, vec!["wcwld_mild"]);
        assert_eq!(counts, vec![4]);
    }
}
