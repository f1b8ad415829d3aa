//! Rute Wisata HTTP presentation layer
//!
//! Exposes catalog lookups, route generation, batch reconciliation and
//! single-route geometry over a JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
