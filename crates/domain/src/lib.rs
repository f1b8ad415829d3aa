//! Domain layer for the tourism route planner
//!
//! Contains the route model, value objects, raw-record normalization and
//! domain errors. This layer performs no I/O and defines the ubiquitous
//! language shared by every other crate.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
