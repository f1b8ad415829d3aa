//! Transport mode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// How the traveller moves between stops
///
/// Drives routing-profile selection and post-hoc duration correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    /// Private car
    #[default]
    #[serde(rename = "car")]
    Car,
    /// Motorcycle or scooter
    #[serde(rename = "bike", alias = "motorcycle", alias = "two_wheeled")]
    TwoWheeled,
    /// On foot
    #[serde(rename = "foot", alias = "walking")]
    Walking,
}

impl TransportMode {
    /// All modes, in selector order
    pub const ALL: [Self; 3] = [Self::Car, Self::TwoWheeled, Self::Walking];

    /// Wire identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::TwoWheeled => "bike",
            Self::Walking => "foot",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Car => "Mobil",
            Self::TwoWheeled => "Motor",
            Self::Walking => "Jalan Kaki",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" | "mobil" | "driving" => Ok(Self::Car),
            "bike" | "motorcycle" | "motor" | "two_wheeled" | "two-wheeled" => {
                Ok(Self::TwoWheeled)
            },
            "foot" | "walking" | "walk" => Ok(Self::Walking),
            other => Err(DomainError::InvalidTransportMode(other.to_string())),
        }
    }
}
