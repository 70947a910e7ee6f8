// src/location/command.rs — Fix from an external locator command

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;

use super::{LocationError, LocationProvider};
use crate::core::state::GeoFix;
use crate::infra::errors::FicharError;

/// Runs a configured command (e.g. `termux-location`) and parses the JSON
/// fix it prints to stdout.
pub struct CommandLocationProvider {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

/// What the locator command prints. `accuracy` is optional; some locators
/// only report coordinates.
#[derive(Debug, Deserialize)]
struct CommandFix {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    accuracy: Option<f64>,
}

impl CommandLocationProvider {
    pub fn new(command_line: &str, timeout: Duration) -> Result<Self, FicharError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| FicharError::Config("location.command is empty".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
            timeout,
        })
    }
}

#[async_trait]
impl LocationProvider for CommandLocationProvider {
    fn id(&self) -> &str {
        "command"
    }

    async fn fetch(&self) -> Result<GeoFix, FicharError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program).args(&self.args).output(),
        )
        .await
        .map_err(|_| LocationError::Timeout)?
        .map_err(|e| {
            tracing::debug!("locator command failed to start: {e}");
            LocationError::SignalUnavailable
        })?;

        if !output.status.success() {
            // Locators exit non-zero when the OS denies the position request.
            return Err(LocationError::PermissionDenied.into());
        }

        let raw: CommandFix = serde_json::from_slice(&output.stdout)
            .map_err(|_| LocationError::SignalUnavailable)?;
        let fix = GeoFix {
            latitude: raw.latitude,
            longitude: raw.longitude,
            accuracy: raw.accuracy.unwrap_or(0.0),
            timestamp: Utc::now(),
        };
        if !fix.is_valid() {
            return Err(LocationError::SignalUnavailable.into());
        }
        tracing::info!(
            "fix {:.4}, {:.4} (±{:.0}m)",
            fix.latitude,
            fix.longitude,
            fix.accuracy
        );
        Ok(fix)
    }
}
