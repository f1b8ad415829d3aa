//! Destination catalog backed by a JSONL export

mod jsonl;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use jsonl::{JsonlDestinationCatalog, parse_jsonl};

/// Catalog location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSONL file, one destination record per line
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from("data/data_wisata.jsonl")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl CatalogConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("path must not be empty".to_string());
        }
        Ok(())
    }
}
