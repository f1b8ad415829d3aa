//! Health aggregation service
//!
//! Checks the routing engine and the route-generation backend with
//! configurable timeouts and reports each one individually.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{RoutePlannerPort, RoutingPort};

/// Default global timeout for health checks in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Global timeout for all health checks in seconds (default: 5)
    #[serde(default = "default_global_timeout")]
    pub global_timeout_secs: u64,

    /// Service-specific timeout overrides in seconds
    #[serde(default)]
    pub service_timeouts: HashMap<String, u64>,
}

const fn default_global_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_global_timeout(),
            service_timeouts: HashMap::new(),
        }
    }
}

impl HealthConfig {
    /// Get the timeout for a specific service
    #[must_use]
    pub fn timeout_for_service(&self, service: &str) -> Duration {
        let secs = self
            .service_timeouts
            .get(service)
            .copied()
            .unwrap_or(self.global_timeout_secs);
        Duration::from_secs(secs)
    }
}

/// Status of an individual service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Whether the service is wired up at all
    #[serde(default = "default_configured")]
    pub configured: bool,
    /// Response time in milliseconds (if check was performed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

const fn default_configured() -> bool {
    true
}

impl ServiceHealth {
    /// Create a healthy status
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            healthy: true,
            configured: true,
            response_time_ms: None,
            error: None,
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            configured: true,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Create an unhealthy status due to timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    /// Create a status for a service that is not wired up
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            healthy: false,
            configured: false,
            response_time_ms: None,
            error: None,
        }
    }

    /// Add response time to the status
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health report for every checked service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True if every configured service is healthy
    pub healthy: bool,
    /// Individual service statuses
    pub services: HashMap<String, ServiceHealth>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Create a new health report
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = services
            .values()
            .filter(|s| s.configured)
            .all(|s| s.healthy);

        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Get status of a specific service
    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating health checks across external services
pub struct HealthService {
    config: HealthConfig,
    routing: Arc<dyn RoutingPort>,
    planner: Option<Arc<dyn RoutePlannerPort>>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .field("routing", &"<RoutingPort>")
            .field("planner", &self.planner.is_some())
            .finish()
    }
}

impl HealthService {
    /// Create a new health service with the required routing port
    #[must_use]
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            config: HealthConfig::default(),
            routing,
            planner: None,
        }
    }

    /// Set the health check configuration
    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    /// Add the route-generation backend for health checking
    #[must_use]
    pub fn with_planner(mut self, planner: Arc<dyn RoutePlannerPort>) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Check health of all configured services
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (routing, planner) = tokio::join!(self.check_routing(), self.check_planner());

        let mut services = HashMap::new();
        services.insert("routing".to_string(), routing);
        services.insert("planner".to_string(), planner);
        HealthReport::new(services)
    }

    /// Check the routing engine
    pub async fn check_routing(&self) -> ServiceHealth {
        self.timed_check("routing", self.routing.is_available()).await
    }

    /// Check the route-generation backend
    pub async fn check_planner(&self) -> ServiceHealth {
        let Some(ref planner) = self.planner else {
            return ServiceHealth::unconfigured();
        };
        self.timed_check("planner", planner.is_available()).await
    }

    async fn timed_check(&self, service: &str, check: impl Future<Output = bool>) -> ServiceHealth {
        let start = std::time::Instant::now();

        let Ok(available) = timeout(self.config.timeout_for_service(service), check).await else {
            warn!(service, "Health check timed out");
            return ServiceHealth::timeout();
        };

        // Milliseconds of a bounded health check fit in u64.
        #[allow(clippy::cast_possible_truncation)]
        let response_time = start.elapsed().as_millis() as u64;
        if available {
            debug!(service, response_time_ms = response_time, "Service healthy");
            ServiceHealth::healthy().with_response_time(response_time)
        } else {
            warn!(service, response_time_ms = response_time, "Service unhealthy");
            ServiceHealth::unhealthy(format!("{service} unavailable")).with_response_time(response_time)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use domain::{RouteComputation, TransportMode, Waypoint};

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{MockRoutePlannerPort, MockRoutingPort};

    fn routing(available: bool) -> Arc<dyn RoutingPort> {
        let mut mock = MockRoutingPort::new();
        mock.expect_is_available().return_const(available);
        Arc::new(mock)
    }

    fn planner(available: bool) -> Arc<dyn RoutePlannerPort> {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_is_available().return_const(available);
        Arc::new(mock)
    }

    #[derive(Debug)]
    struct HangingRouting;

    #[async_trait]
    impl RoutingPort for HangingRouting {
        async fn compute_route(
            &self,
            _waypoints: &[Waypoint],
            _mode: TransportMode,
        ) -> Result<RouteComputation, ApplicationError> {
            Err(ApplicationError::NoRouteFound)
        }

        async fn is_available(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(60)).await;
            true
        }
    }

    #[tokio::test]
    async fn all_healthy() {
        let service = HealthService::new(routing(true)).with_planner(planner(true));
        let report = service.check_all().await;

        assert!(report.healthy);
        assert!(report.service_status("routing").unwrap().healthy);
        assert!(report.service_status("planner").unwrap().response_time_ms.is_some());
    }

    #[tokio::test]
    async fn unhealthy_routing_marks_report_unhealthy() {
        let service = HealthService::new(routing(false)).with_planner(planner(true));
        let report = service.check_all().await;

        assert!(!report.healthy);
        let status = report.service_status("routing").unwrap();
        assert_eq!(status.error.as_deref(), Some("routing unavailable"));
    }

    #[tokio::test]
    async fn unconfigured_planner_does_not_count() {
        let service = HealthService::new(routing(true));
        let report = service.check_all().await;

        assert!(report.healthy);
        assert!(!report.service_status("planner").unwrap().configured);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_service_times_out() {
        let mut timeouts = HashMap::new();
        timeouts.insert("routing".to_string(), 1);
        let service = HealthService::new(Arc::new(HangingRouting)).with_config(HealthConfig {
            global_timeout_secs: 5,
            service_timeouts: timeouts,
        });

        let status = service.check_routing().await;
        assert!(!status.healthy);
        assert_eq!(status.error.as_deref(), Some("Health check timed out"));
    }

    #[test]
    fn timeout_override_falls_back_to_global() {
        let config = HealthConfig::default();
        assert_eq!(config.timeout_for_service("planner"), Duration::from_secs(5));
    }
}
