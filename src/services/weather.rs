use chrono::{Duration, Utc};

use crate::models::alert::WeatherAlert;

/// Weather alerts for the service area. No provider is wired up yet, so a
/// fixed advisory is returned.
pub struct WeatherService {
    api_key: Option<String>,
}

impl WeatherService {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("Weather API key not configured, serving mock alerts");
        }
        Self { api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn current_alerts(&self) -> Vec<WeatherAlert> {
        vec![WeatherAlert {
            id: 1,
            alert_type: "flood_warning".to_string(),
            severity: "moderate".to_string(),
            title: "Heavy Rainfall Warning".to_string(),
            message: "Heavy rainfall expected in next 24 hours. Ensure your emergency kit is ready!"
                .to_string(),
            location: "Mumbai, Maharashtra".to_string(),
            valid_until: Utc::now() + Duration::hours(24),
        }]
    }
}
