// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::timer::PauseRules;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub pause: PauseConfig,

    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Clock service endpoint (the headless-browser proxy).
    pub url: String,
    /// Per-request timeout, also applied to location fetches.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/api/fichaje".into(),
            timeout_secs: 20,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseConfig {
    /// Alarm when an in-progress pause exceeds this many minutes.
    pub alarm_after_minutes: u64,
    /// A pause may only be ended after this many minutes.
    pub minimum_minutes: u64,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            alarm_after_minutes: 14,
            minimum_minutes: 5,
        }
    }
}

impl PauseConfig {
    pub fn rules(&self) -> PauseRules {
        PauseRules {
            alarm_after: Duration::from_secs(self.alarm_after_minutes * 60),
            min_pause: Duration::from_secs(self.minimum_minutes * 60),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// "command" runs an external locator, "fixed" uses the coordinates below.
    #[serde(default = "default_location_provider")]
    pub provider: String,
    /// Command line producing a JSON fix on stdout (e.g. "termux-location").
    pub command: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_location_provider(),
            command: None,
            latitude: None,
            longitude: None,
            accuracy: default_accuracy(),
        }
    }
}

fn default_location_provider() -> String {
    "command".into()
}

fn default_accuracy() -> f64 {
    50.0
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
