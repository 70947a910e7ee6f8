// src/location/fixed.rs — Static fix from configuration

use async_trait::async_trait;
use chrono::Utc;

use super::{LocationError, LocationProvider};
use crate::core::state::GeoFix;
use crate::infra::errors::FicharError;

/// Always reports the configured coordinates. Meant for fixed workplaces
/// where a live locator is unavailable; each fetch stamps the current time
/// so the clock service still sees a fresh fix.
pub struct FixedLocationProvider {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
}

impl FixedLocationProvider {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn id(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self) -> Result<GeoFix, FicharError> {
        let fix = GeoFix {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            timestamp: Utc::now(),
        };
        if !fix.is_valid() {
            return Err(LocationError::SignalUnavailable.into());
        }
        Ok(fix)
    }
}
