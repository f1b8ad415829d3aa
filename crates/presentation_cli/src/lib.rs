//! Rute Wisata CLI
//!
//! Runs route generation, reconciliation and visualization in-process
//! against the configured routing engine and backend.

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
