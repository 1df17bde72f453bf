//! Validation utilities for the Plant Disease Advisory Platform

/// Validate that GPS coordinates are on the globe
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a detection confidence threshold
pub fn validate_confidence_threshold(threshold: f32) -> Result<(), &'static str> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err("Confidence threshold must be between 0 and 1");
    }
    Ok(())
}
