//! Application configuration
//!
//! Sources, lowest precedence first:
//! 1. serde defaults on every field
//! 2. `config.toml` (or an explicit file)
//! 3. `RUTE_`-prefixed environment variables, `__` between sections
//!    (e.g. `RUTE_ROUTING__BASE_URL`, `RUTE_SERVER__PORT`)

mod server;

use std::path::Path;

use application::{HealthConfig, ReconciliationConfig};
use domain::Waypoint;
use integration_osrm::OsrmConfig;
use integration_planner::PlannerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogConfig;
use crate::telemetry::LoggingConfig;

pub use server::ServerConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RUTE";

/// Origin used when a caller supplies none
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Latitude in degrees
    #[serde(default = "default_origin_latitude")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(default = "default_origin_longitude")]
    pub longitude: f64,
}

const fn default_origin_latitude() -> f64 {
    Waypoint::surabaya().latitude()
}

const fn default_origin_longitude() -> f64 {
    Waypoint::surabaya().longitude()
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            latitude: default_origin_latitude(),
            longitude: default_origin_longitude(),
        }
    }
}

impl OriginConfig {
    /// The configured origin as a waypoint
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range.
    pub fn waypoint(&self) -> Result<Waypoint, String> {
        Waypoint::new(self.latitude, self.longitude)
            .map_err(|e| format!("default_origin: {e}"))
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Road routing engine
    #[serde(default)]
    pub routing: OsrmConfig,

    /// Route-generation backend
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Batch reconciliation
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,

    /// Destination catalog
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Health checks
    #[serde(default)]
    pub health: HealthConfig,

    /// Origin used when a request carries none
    #[serde(default)]
    pub default_origin: OriginConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or `config.toml`
    /// (optional), then the environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(file, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
    }

    fn build(file: Option<&Path>, env: config::Environment) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(
            routing = %app.routing.base_url,
            planner = %app.planner.base_url,
            catalog = %app.catalog.path.display(),
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error, prefixed with the section name.
    pub fn validate(&self) -> Result<(), String> {
        self.routing.validate().map_err(|e| format!("routing: {e}"))?;
        self.planner.validate().map_err(|e| format!("planner: {e}"))?;
        self.reconciliation
            .validate()
            .map_err(|e| format!("reconciliation: {e}"))?;
        self.catalog.validate().map_err(|e| format!("catalog: {e}"))?;
        self.server.validate()?;
        self.logging.validate().map_err(|e| format!("logging: {e}"))?;
        self.default_origin.waypoint()?;
        Ok(())
    }
}
