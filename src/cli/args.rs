//! Command-line argument definitions for plant proximity
//!
//! Defines the CLI interface using the clap derive API. Options shared by
//! all subcommands live in [`CommonArgs`] and override the layered
//! configuration.

use crate::error::{PlantError, Result};
use crate::geo::GeoPoint;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the plant proximity tool
///
/// Finds the plants nearest to a GPS position in a plant inventory CSV,
/// either for a single position or by replaying a recorded track through
/// the throttled refresh loop.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "plant-proximity",
    version,
    about = "Find the plants nearest to a GPS position in a plant inventory CSV",
    long_about = "Parses a fixed-column plant inventory, ranks records by great-circle distance \
                  from a position, and emits the nearest records the way a camera-overlay \
                  renderer would receive them. Positions can be given once or replayed from a \
                  recorded track with the same refresh throttling used on device."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List the plants nearest to a single position
    Nearby(NearbyArgs),
    /// Replay a recorded position track through the throttled refresh loop
    Replay(ReplayArgs),
    /// Parse an inventory and report row statistics
    Inspect(InspectArgs),
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured tables for terminals
    Human,
    /// Newline-delimited JSON
    Json,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Inventory file path or HTTP(S) URL
    #[arg(
        short = 's',
        long = "source",
        value_name = "PATH_OR_URL",
        help = "Inventory file path or HTTP(S) URL"
    )]
    pub source: Option<String>,

    /// Path to a JSON configuration file
    ///
    /// If not specified, uses <config dir>/plant-proximity/config.json when it exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Search radius in meters
    #[arg(
        short = 'r',
        long = "radius",
        value_name = "METERS",
        help = "Search radius around the position in meters"
    )]
    pub radius_meters: Option<f64>,

    /// Maximum number of plants to show
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "COUNT",
        help = "Maximum number of plants per refresh"
    )]
    pub limit: Option<usize>,

    /// Column delimiter of the inventory file
    #[arg(long = "delimiter", value_name = "CHAR", help = "Inventory column delimiter")]
    pub delimiter: Option<char>,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the nearby command
#[derive(Debug, Clone, Parser)]
pub struct NearbyArgs {
    /// Latitude of the position in degrees
    #[arg(long = "lat", allow_negative_numbers = true, value_name = "DEGREES")]
    pub latitude: f64,

    /// Longitude of the position in degrees
    #[arg(long = "lon", allow_negative_numbers = true, value_name = "DEGREES")]
    pub longitude: f64,

    /// Seed for marker colour assignment
    #[arg(long = "palette-seed", value_name = "SEED")]
    pub palette_seed: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the replay command
#[derive(Debug, Clone, Parser)]
pub struct ReplayArgs {
    /// Position track file: `timestamp,latitude,longitude` per line
    ///
    /// Timestamps are integer milliseconds or RFC 3339 datetimes. Blank lines
    /// and lines starting with '#' are ignored.
    #[arg(value_name = "TRACK")]
    pub track: PathBuf,

    /// Minimum milliseconds between inventory refreshes
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Seed for marker colour assignment
    #[arg(long = "palette-seed", value_name = "SEED")]
    pub palette_seed: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Nearby(args)) => args.validate(),
            Some(Commands::Replay(args)) => args.validate(),
            Some(Commands::Inspect(args)) => args.common.validate(),
            None => Ok(()),
        }
    }
}

impl CommonArgs {
    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(PlantError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(source) = &self.source {
            if source.trim().is_empty() {
                return Err(PlantError::configuration("Source cannot be empty"));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are drawn on stderr unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl NearbyArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.position().is_valid() {
            return Err(PlantError::configuration(format!(
                "Position out of range: latitude {} longitude {}",
                self.latitude, self.longitude
            )));
        }

        Ok(())
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl ReplayArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.track.exists() {
            return Err(PlantError::configuration(format!(
                "Track file does not exist: {}",
                self.track.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nearby_with_negative_longitude() {
        let args = Args::try_parse_from([
            "plant-proximity",
            "nearby",
            "--lat",
            "40.0",
            "--lon",
            "-75.0",
            "-r",
            "250",
            "-n",
            "5",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Nearby(nearby)) => {
                assert_eq!(nearby.position(), GeoPoint::new(40.0, -75.0));
                assert_eq!(nearby.common.radius_meters, Some(250.0));
                assert_eq!(nearby.common.limit, Some(5));
                assert_eq!(nearby.common.format, OutputFormat::Human);
                assert!(nearby.validate().is_ok());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_replay() {
        let args = Args::try_parse_from([
            "plant-proximity",
            "replay",
            "track.csv",
            "--interval-ms",
            "2000",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Replay(replay)) => {
                assert_eq!(replay.track, PathBuf::from("track.csv"));
                assert_eq!(replay.interval_ms, Some(2000));
                assert_eq!(replay.common.format, OutputFormat::Json);
                assert_eq!(replay.common.get_log_level(), "debug");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["plant-proximity", "inspect", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        let args = Args::try_parse_from([
            "plant-proximity",
            "nearby",
            "--lat",
            "95.0",
            "--lon",
            "10.0",
        ])
        .unwrap();

        assert!(args.validate().is_err());
    }
}
