//! Route-generation backend integration
//!
//! The backend runs a genetic optimizer over the destination catalog and
//! returns ranked multi-stop candidate routes for an origin. Its distances
//! are straight-line estimates; reconciliation against a road network
//! happens elsewhere.
//!
//! [`PlannerClient`] defines the interface and [`HttpPlannerClient`]
//! implements it over `POST {base}/generate-routes`. The backend encodes
//! coordinates as `[latitude, longitude]` arrays; conversion to
//! [`domain::Waypoint`] happens in this crate.

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpPlannerClient, PlannerClient};
pub use config::PlannerConfig;
pub use error::PlannerError;
