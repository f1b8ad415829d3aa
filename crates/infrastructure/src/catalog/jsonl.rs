//! JSONL loading and lookups
//!
//! The file is read once, on first use. Concurrent first callers share a
//! single load; a failed load is retried by the next caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::DestinationCatalogPort;
use async_trait::async_trait;
use domain::{Destination, RawDestinationRecord};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::CatalogConfig;

/// Parse JSONL content into normalized destinations
///
/// Blank lines are ignored. Lines that are not a JSON object are skipped
/// with a warning; the rest of the file still loads.
pub fn parse_jsonl(content: &str) -> Vec<Destination> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            match serde_json::from_str::<RawDestinationRecord>(line) {
                Ok(record) => Some(record.normalize()),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "Skipping malformed catalog line");
                    None
                },
            }
        })
        .collect()
}

/// Read-only catalog loaded lazily from a JSONL file
#[derive(Debug)]
pub struct JsonlDestinationCatalog {
    path: PathBuf,
    destinations: OnceCell<Arc<Vec<Destination>>>,
}

impl JsonlDestinationCatalog {
    /// Create a catalog for the configured file
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::from_path(config.path.clone())
    }

    /// Create a catalog for an explicit file
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            destinations: OnceCell::new(),
        }
    }

    /// Create an already-loaded catalog
    #[must_use]
    pub fn from_destinations(destinations: Vec<Destination>) -> Self {
        Self {
            path: PathBuf::new(),
            destinations: OnceCell::new_with(Some(Arc::new(destinations))),
        }
    }

    /// Path the catalog reads from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the file has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.destinations.initialized()
    }

    async fn destinations(&self) -> Result<Arc<Vec<Destination>>, ApplicationError> {
        self.destinations
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Arc<Vec<Destination>>, ApplicationError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ApplicationError::Configuration(format!(
                "cannot read destination catalog {}: {e}",
                self.path.display()
            ))
        })?;

        let destinations = parse_jsonl(&content);
        info!(count = destinations.len(), "Destination catalog loaded");
        Ok(Arc::new(destinations))
    }
}

#[async_trait]
impl DestinationCatalogPort for JsonlDestinationCatalog {
    async fn all(&self) -> Result<Vec<Destination>, ApplicationError> {
        Ok(self.destinations().await?.as_ref().clone())
    }

    async fn find_by_place_id(
        &self,
        place_id: &str,
    ) -> Result<Option<Destination>, ApplicationError> {
        let destinations = self.destinations().await?;
        Ok(destinations
            .iter()
            .find(|d| d.place_id.as_deref() == Some(place_id))
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Destination>, ApplicationError> {
        let wanted = name.trim().to_lowercase();
        let destinations = self.destinations().await?;
        Ok(destinations
            .iter()
            .find(|d| d.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Destination>, ApplicationError> {
        let category = category.trim();
        let matching: Vec<Destination> = self
            .destinations()
            .await?
            .iter()
            .filter(|d| d.has_category(category))
            .cloned()
            .collect();
        debug!(category, count = matching.len(), "Catalog filtered");
        Ok(matching)
    }
}
