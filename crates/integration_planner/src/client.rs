//! HTTP client for the route-generation backend

use std::time::Duration;

use async_trait::async_trait;
use domain::{RoutePlan, Waypoint};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::models::{GenerateRoutesRequest, RawApiResponse};

/// Trait for route-generation clients
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Request candidate routes starting at `origin`
    async fn generate_routes(&self, origin: Waypoint) -> Result<RoutePlan, PlannerError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;
}

/// Route-generation client over HTTP/JSON
#[derive(Debug)]
pub struct HttpPlannerClient {
    client: Client,
    config: PlannerConfig,
}

impl HttpPlannerClient {
    /// Create a new backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        config.validate().map_err(PlannerError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PlannerError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Parse the backend envelope
    fn parse_response(body: &str, origin: Waypoint) -> Result<RoutePlan, PlannerError> {
        let raw: RawApiResponse =
            serde_json::from_str(body).map_err(|e| PlannerError::ParseError(e.to_string()))?;

        if !raw.success {
            return Err(PlannerError::Rejected(raw.message));
        }

        let data = raw
            .data
            .ok_or_else(|| PlannerError::ParseError("response has no data".to_string()))?;

        Ok(data.into_plan(origin))
    }
}

#[async_trait]
impl PlannerClient for HttpPlannerClient {
    #[instrument(skip(self), fields(origin = %origin))]
    async fn generate_routes(&self, origin: Waypoint) -> Result<RoutePlan, PlannerError> {
        let url = self.endpoint("generate-routes");
        debug!(%url, "Requesting candidate routes");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRoutesRequest::from(origin))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlannerError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    PlannerError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Route generation request failed");
            return Err(PlannerError::UpstreamError {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlannerError::ParseError(e.to_string()))?;

        let plan = Self::parse_response(&body, origin)?;
        info!(routes = plan.routes.len(), "Candidate routes received");
        Ok(plan)
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.endpoint("")).send().await {
            Ok(resp) => !resp.status().is_server_error(),
            Err(e) => {
                warn!(error = %e, "Route generation backend health check failed");
                false
            },
        }
    }
}
