//! Route optimizer client
//!
//! The external optimization service is advisory: it receives the stops and
//! proposes a visiting order as a JSON array of indices. Everything about
//! the call is allowed to fail (timeout, transport, malformed body) and
//! every failure degrades to the local heuristic, never to a caller-visible
//! error.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::types::OptimizeRequest;

/// Errors from an optimization attempt
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("optimizer request failed: {0}")]
    Transport(String),

    #[error("optimizer returned status {0}")]
    Status(u16),

    #[error("optimizer response was not a JSON array: {0}")]
    Malformed(String),

    #[error("no optimizer configured")]
    NotConfigured,
}

/// A proposed visiting order: the raw JSON array elements, still
/// unvalidated. The planner drops entries that are not usable indices.
pub type ProposedOrder = Vec<serde_json::Value>;

/// Seam for the external optimizer, so tests can swap in a scripted one
#[async_trait]
pub trait RouteOptimizer: Send + Sync {
    /// Ask for a visiting order and return the raw array along with the
    /// verbatim response body for the audit trail.
    async fn propose_order(
        &self,
        request: &OptimizeRequest,
    ) -> Result<(ProposedOrder, String), OptimizerError>;
}

/// HTTP implementation against a JSON endpoint
pub struct HttpRouteOptimizer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpRouteOptimizer {
    pub fn new(endpoint: String, timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[async_trait]
impl RouteOptimizer for HttpRouteOptimizer {
    async fn propose_order(
        &self,
        request: &OptimizeRequest,
    ) -> Result<(ProposedOrder, String), OptimizerError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OptimizerError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(OptimizerError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| OptimizerError::Transport(e.to_string()))?;

        let order: ProposedOrder =
            serde_json::from_str(&body).map_err(|e| OptimizerError::Malformed(e.to_string()))?;

        Ok((order, body))
    }
}
