//! Lightweight health check for the configured LLM endpoint.
//!
//! Probes `GET {endpoint}/v1/models` with Bearer auth. The returned
//! [`HealthStatus`] is JSON-serializable and suitable for a `/health` route.
//! [`HealthService::check`] is resilient and never fails (errors are mapped
//! to `ok = false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{config::llm_model_config::LlmModelConfig, error_handler::AiLlmError};

/// A serializable health snapshot for one endpoint/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier the probe ran on behalf of.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Probes the endpoint's `/v1/models` listing. Never returns an error;
    /// any failure is reported inside the snapshot.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let url = format!("{}/v1/models", cfg.endpoint.trim_end_matches('/'));
        let started = Instant::now();

        debug!(%url, "health probe");

        let mut req = self.client.get(&url);
        if let Some(key) = &cfg.api_key {
            req = req.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        match req.send().await {
            Ok(resp) => {
                let latency_ms = started.elapsed().as_millis();
                let status = resp.status();
                if status.is_success() {
                    HealthStatus {
                        endpoint: cfg.endpoint.clone(),
                        model: cfg.model.clone(),
                        ok: true,
                        latency_ms,
                        message: "reachable".into(),
                    }
                } else {
                    warn!(%status, %url, "health probe returned non-success status");
                    HealthStatus {
                        endpoint: cfg.endpoint.clone(),
                        model: cfg.model.clone(),
                        ok: false,
                        latency_ms,
                        message: format!("HTTP {status}"),
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, %url, "health probe failed");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: cfg.model.clone(),
                    ok: false,
                    latency_ms: started.elapsed().as_millis(),
                    message: e.to_string(),
                }
            }
        }
    }
}
