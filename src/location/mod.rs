// src/location/mod.rs — Geolocation providers

pub mod command;
pub mod fixed;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::state::GeoFix;
use crate::infra::config::LocationConfig;
use crate::infra::errors::FicharError;

/// Why no fix could be obtained. Mirrors the three failure modes of the
/// browser geolocation API the original app ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location signal unavailable")]
    SignalUnavailable,
    #[error("location request timed out")]
    Timeout,
}

/// Supplies the geolocation fix required before any clock-service call.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn fetch(&self) -> Result<GeoFix, FicharError>;
}

/// Build the configured provider.
pub fn from_config(
    config: &LocationConfig,
    timeout: Duration,
) -> Result<Arc<dyn LocationProvider>, FicharError> {
    match config.provider.as_str() {
        "command" => {
            let command_line = config.command.as_deref().ok_or_else(|| {
                FicharError::Config("location.provider = \"command\" requires location.command".into())
            })?;
            Ok(Arc::new(command::CommandLocationProvider::new(
                command_line,
                timeout,
            )?))
        }
        "fixed" => {
            let (latitude, longitude) = match (config.latitude, config.longitude) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    return Err(FicharError::Config(
                        "location.provider = \"fixed\" requires location.latitude and location.longitude".into(),
                    ))
                }
            };
            Ok(Arc::new(fixed::FixedLocationProvider::new(
                latitude,
                longitude,
                config.accuracy,
            )))
        }
        other => Err(FicharError::Config(format!(
            "unknown location provider '{other}' (expected \"command\" or \"fixed\")"
        ))),
    }
}
