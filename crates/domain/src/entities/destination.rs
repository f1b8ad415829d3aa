//! Destination entity

use serde::{Deserialize, Serialize};

use crate::value_objects::Waypoint;

/// A place a tourist can visit
///
/// Identity (name, categories, coordinates) is fixed once constructed; the
/// optional metadata is presentation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// External place identifier, if the source had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Position of this stop in the visiting order (1-based, 0 if unknown)
    #[serde(default)]
    pub order: u32,
    /// Display name
    pub name: String,
    /// Category tags (e.g. "makanan_berat", "mall")
    #[serde(default)]
    pub categories: Vec<String>,
    /// Location of the place
    pub coordinates: Waypoint,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Opening hours as printed on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Average rating (0.0 - 5.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Picture shown on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Destination {
    /// Create a destination with identity fields only
    #[must_use]
    pub fn new(name: impl Into<String>, coordinates: Waypoint) -> Self {
        Self {
            place_id: None,
            order: 0,
            name: name.into(),
            categories: Vec::new(),
            coordinates,
            description: None,
            address: None,
            opening_hours: None,
            rating: None,
            image_url: None,
        }
    }

    /// Set the external place identifier
    #[must_use]
    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    /// Set the visiting order
    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the category tags
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the destination carries a category tag
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Primary category, if any
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}
