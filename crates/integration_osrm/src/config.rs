//! Routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OSRM route service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server (without the `/route/v1` suffix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Multiplier applied to car-profile durations for two-wheeled travel
    ///
    /// OSRM has no motorcycle profile; the car profile is reused and its
    /// duration scaled. 0.8 is a heuristic, not measured telemetry.
    #[serde(default = "default_two_wheeled_duration_factor")]
    pub two_wheeled_duration_factor: f64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_two_wheeled_duration_factor() -> f64 {
    0.8
}

fn default_user_agent() -> String {
    concat!("rute-wisata/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            two_wheeled_duration_factor: default_two_wheeled_duration_factor(),
            user_agent: default_user_agent(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !self.two_wheeled_duration_factor.is_finite() || self.two_wheeled_duration_factor <= 0.0
        {
            return Err("two_wheeled_duration_factor must be a positive number".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, "https://router.project-osrm.org");
        assert_eq!(config.timeout_secs, 10);
        assert!((config.two_wheeled_duration_factor - 0.8).abs() < f64::EPSILON);
        assert!(config.user_agent.starts_with("rute-wisata/"));
    }

    #[test]
    fn test_testing_config() {
        let config = OsrmConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validation_success() {
        assert!(OsrmConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = OsrmConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = OsrmConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_factor() {
        for factor in [0.0, -0.5, f64::NAN] {
            let config = OsrmConfig {
                two_wheeled_duration_factor: factor,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: OsrmConfig =
            serde_json::from_str(r#"{ "base_url": "http://localhost:5000" }"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 10);
        assert!((config.two_wheeled_duration_factor - 0.8).abs() < f64::EPSILON);
    }
}
