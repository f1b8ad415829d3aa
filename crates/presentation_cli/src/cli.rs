//! Command-line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::{TransportMode, Waypoint};

/// Rute Wisata CLI
#[derive(Debug, Parser)]
#[command(name = "rute-wisata")]
#[command(author, version, about = "Surabaya tourism route planner", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml if present)
    #[arg(short, long, global = true, env = "RUTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Starting point override
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct OriginArgs {
    /// Origin latitude (default: configured origin)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Origin longitude (default: configured origin)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl OriginArgs {
    /// The requested origin, if both coordinates were given
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range.
    pub fn waypoint(&self) -> anyhow::Result<Option<Waypoint>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Waypoint::new(lat, lon)
                .map(Some)
                .map_err(|e| anyhow::anyhow!("{e}")),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate candidate routes and reconcile them against the road network
    ///
    /// Example: rute-wisata generate --lat -7.2458 --lon 112.7378
    Generate {
        #[command(flatten)]
        origin: OriginArgs,

        /// Print the batch as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate routes, then draw one of them for a transport mode
    ///
    /// Example: rute-wisata show --rank 2 --mode bike --output route.geojson
    Show {
        #[command(flatten)]
        origin: OriginArgs,

        /// Rank of the route to draw
        #[arg(short, long, default_value_t = 1)]
        rank: u32,

        /// Transport mode: car, bike or foot
        #[arg(short, long, default_value = "car")]
        mode: TransportMode,

        /// Write the GeoJSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List catalog destinations
    Destinations {
        /// Only destinations with this category
        #[arg(long)]
        category: Option<String>,

        /// Show a single destination by place id
        #[arg(long, conflicts_with = "category")]
        place_id: Option<String>,
    },

    /// Print the effective configuration
    Config {
        /// Only validate, print nothing on success
        #[arg(long)]
        validate: bool,
    },
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn origin_requires_both_coordinates() {
        let origin = OriginArgs {
            lat: None,
            lon: None,
        };
        assert!(origin.waypoint().unwrap().is_none());

        let origin = OriginArgs {
            lat: Some(-7.25),
            lon: Some(112.75),
        };
        assert_eq!(
            origin.waypoint().unwrap(),
            Some(Waypoint::new(-7.25, 112.75).unwrap())
        );
    }

    #[test]
    fn out_of_range_origin_is_an_error() {
        let origin = OriginArgs {
            lat: Some(100.0),
            lon: Some(112.75),
        };
        assert!(origin.waypoint().is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
