//! Weather enrichment for uploads

use shared::{GpsCoordinates, WeatherObservation};

use crate::external::WeatherClient;

/// Fetches and classifies current weather for an upload's coordinates.
///
/// Every failure mode degrades to "no weather data": the caller proceeds
/// with the weather-agnostic recommendation tier and the user never sees a
/// weather error.
#[derive(Clone)]
pub struct WeatherService {
    client: Option<WeatherClient>,
}

impl WeatherService {
    /// Create a new WeatherService; pass `None` when no API key is configured
    pub fn new(client: Option<WeatherClient>) -> Self {
        Self { client }
    }

    /// Current observation at the given coordinates, if available
    pub async fn observe(&self, location: GpsCoordinates) -> Option<WeatherObservation> {
        let client = self.client.as_ref()?;

        match client
            .get_current(location.latitude, location.longitude)
            .await
        {
            Ok(reading) => Some(WeatherObservation::from(reading)),
            Err(e) => {
                tracing::warn!("Weather lookup failed, continuing without weather data: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_observe_without_client_is_none() {
        let service = WeatherService::new(None);
        let observation = service.observe(GpsCoordinates::new(5.9496, 80.4521)).await;
        assert!(observation.is_none());
    }

    #[tokio::test]
    async fn test_observe_degrades_on_unreachable_service() {
        // Nothing listens on this port; the lookup must degrade, not error
        let client = WeatherClient::with_base_url(
            "test-key".to_string(),
            1,
            "http://127.0.0.1:9/data/2.5".to_string(),
        );
        let service = WeatherService::new(Some(client));
        let observation = service.observe(GpsCoordinates::new(5.9496, 80.4521)).await;
        assert!(observation.is_none());
    }
}
