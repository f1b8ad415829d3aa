//! Destination catalog port

use async_trait::async_trait;
use domain::Destination;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for read-only access to the destination catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DestinationCatalogPort: Send + Sync {
    /// Every destination in catalog order
    async fn all(&self) -> Result<Vec<Destination>, ApplicationError>;

    /// Look up a destination by its external place id
    async fn find_by_place_id(
        &self,
        place_id: &str,
    ) -> Result<Option<Destination>, ApplicationError>;

    /// Look up a destination by name (case-insensitive)
    async fn find_by_name(&self, name: &str) -> Result<Option<Destination>, ApplicationError>;

    /// Destinations carrying a category tag (case-insensitive)
    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Destination>, ApplicationError>;
}
