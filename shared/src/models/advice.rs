//! Recommendation advice models

use serde::{Deserialize, Serialize};

use crate::types::RiskTier;

/// Guidance resolved for a (disease, severity, weather) key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advice {
    pub text: String,
    pub risk: RiskTier,
}

impl Advice {
    /// Constant returned when no rule matches even the weather-agnostic tier.
    pub fn unknown() -> Self {
        Self {
            text: "No generic advice found. Consult an expert.".to_string(),
            risk: RiskTier::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_advice_constant() {
        let advice = Advice::unknown();
        assert_eq!(advice.text, "No generic advice found. Consult an expert.");
        assert_eq!(advice.risk, RiskTier::Unknown);
    }
}
