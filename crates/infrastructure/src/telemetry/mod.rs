//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber with an `EnvFilter` and either
//! human-readable or JSON output.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
