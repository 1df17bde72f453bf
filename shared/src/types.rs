//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Ordinal risk tier attached to a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
            RiskTier::Unknown => "Unknown",
        }
    }

    /// Parse a stored risk tier; anything unrecognized maps to Unknown.
    pub fn parse(s: &str) -> RiskTier {
        match s {
            "Low" => RiskTier::Low,
            "Medium" => RiskTier::Medium,
            "High" => RiskTier::High,
            _ => RiskTier::Unknown,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
