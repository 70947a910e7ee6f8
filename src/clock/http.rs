// src/clock/http.rs — HTTP clock service client

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::{ClockService, PunchRequest, PunchResponse};
use crate::core::machine::ClockStep;
use crate::core::state::GeoFix;
use crate::infra::errors::FicharError;

/// Talks to the clock-in proxy over HTTP. Non-2xx or `success: false` is a
/// hard failure for the step, carrying the server's message when it sent one.
pub struct HttpClockService {
    url: Url,
    client: reqwest::Client,
}

impl HttpClockService {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FicharError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FicharError::Config(format!("http client: {e}")))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl ClockService for HttpClockService {
    fn id(&self) -> &str {
        "http"
    }

    async fn punch(&self, step: ClockStep, fix: &GeoFix) -> Result<(), FicharError> {
        let body = PunchRequest::new(step, fix);
        tracing::debug!(action = body.action, point = body.point, "sending punch");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| FicharError::ClockService {
                message: e.to_string(),
            })?;

        let status = response.status();
        match response.json::<PunchResponse>().await {
            Ok(PunchResponse { success: true, .. }) if status.is_success() => Ok(()),
            Ok(PunchResponse {
                error: Some(message),
                ..
            }) => Err(FicharError::ClockService { message }),
            _ => Err(FicharError::ClockService {
                message: format!("clock service returned HTTP {status}"),
            }),
        }
    }
}
