//! The external mathformer backend.
//!
//! The backend runs as its own service. It is considered loadable when
//! `GET {url}/health` answers with a success status within the probe timeout.
//! Each operation is a `POST {url}/{operation}` carrying `{"a": .., "b": ..}`
//! and answered with `{"result": <number>}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use super::{ArithmeticBackend, EXTERNAL_BACKEND_NAME};
use crate::core::config::BackendConfig;
use crate::domains::calculator::error::{CalcError, CalcResult};
use crate::domains::calculator::number::Number;
use crate::domains::calculator::operation::Operation;

/// Reasons the external backend could not be loaded at startup.
#[derive(Debug, Error)]
pub enum BackendLoadError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The health probe did not get an answer.
    #[error("{url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The health probe got an error status.
    #[error("{url} answered HTTP {status}")]
    Unhealthy { url: String, status: u16 },
}

#[derive(Debug, Serialize)]
struct OperandsBody {
    a: i64,
    b: i64,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    result: serde_json::Number,
}

/// Client for the mathformer service.
#[derive(Debug, Clone)]
pub struct ExternalBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ExternalBackend {
    /// Probe the configured service and return a backend bound to it.
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn load(config: &BackendConfig) -> Result<Self, BackendLoadError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(BackendLoadError::Client)?;
        let backend = Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        };

        let url = backend.endpoint("health");
        debug!("Probing mathformer backend at {}", url);

        let response = backend
            .client
            .get(&url)
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .send()
            .await
            .map_err(|source| BackendLoadError::Unreachable {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendLoadError::Unhealthy {
                url,
                status: status.as_u16(),
            });
        }

        Ok(backend)
    }

    /// Base URL of the service, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn call(&self, operation: Operation, a: i64, b: i64) -> CalcResult<Number> {
        let url = self.endpoint(operation.as_str());

        let response = self
            .client
            .post(&url)
            .json(&OperandsBody { a, b })
            .send()
            .await
            .map_err(|e| CalcError::backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalcError::backend(format!(
                "{} answered HTTP {}",
                operation,
                status.as_u16()
            )));
        }

        let body: ResultBody = response
            .json()
            .await
            .map_err(|e| CalcError::backend(format!("malformed {} response: {}", operation, e)))?;

        Number::from_json(&body.result)
            .ok_or_else(|| CalcError::backend(format!("{} returned a non-numeric result", operation)))
    }
}

#[async_trait]
impl ArithmeticBackend for ExternalBackend {
    fn name(&self) -> &str {
        EXTERNAL_BACKEND_NAME
    }

    async fn add(&self, a: i64, b: i64) -> CalcResult<Number> {
        self.call(Operation::Add, a, b).await
    }

    async fn sub(&self, a: i64, b: i64) -> CalcResult<Number> {
        self.call(Operation::Sub, a, b).await
    }

    async fn mul(&self, a: i64, b: i64) -> CalcResult<Number> {
        self.call(Operation::Mul, a, b).await
    }

    async fn div(&self, a: i64, b: i64) -> CalcResult<Number> {
        self.call(Operation::Div, a, b).await
    }
}
