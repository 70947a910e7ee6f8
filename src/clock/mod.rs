// src/clock/mod.rs — Clock service layer

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::machine::ClockStep;
use crate::core::state::GeoFix;
use crate::infra::errors::FicharError;

/// The external collaborator that records one clock-in/out. Each call is one
/// elementary step of a transition; steps are never issued concurrently
/// because later ones depend on earlier ones being applied server-side.
#[async_trait]
pub trait ClockService: Send + Sync {
    fn id(&self) -> &str;

    async fn punch(&self, step: ClockStep, fix: &GeoFix) -> Result<(), FicharError>;
}

/// Wire request: `{"action": "entrada"|"salida", "point": "J", "location": {..}}`.
#[derive(Debug, Serialize)]
pub struct PunchRequest<'a> {
    pub action: &'static str,
    pub point: &'static str,
    pub location: &'a GeoFix,
}

impl<'a> PunchRequest<'a> {
    pub fn new(step: ClockStep, fix: &'a GeoFix) -> Self {
        Self {
            action: step.direction.as_str(),
            point: step.point,
            location: fix,
        }
    }
}

/// Wire response: `{"success": bool, "error": optional string}`.
#[derive(Debug, Deserialize)]
pub struct PunchResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
