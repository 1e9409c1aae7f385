//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON config
//! file, then `PLANT_PROXIMITY_*` environment variables, then command-line
//! overrides applied by the CLI.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER, DEFAULT_PALETTE_SEED,
    DEFAULT_RADIUS_METERS, DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_RESULT_LIMIT, ENV_PREFIX,
};
use crate::error::{PlantError, Result};
use crate::parser::RecordParser;
use crate::selector::ProximitySelector;
use crate::source::DataSource;
use crate::throttle::RefreshThrottle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Default inventory location, relative to the working directory
pub const DEFAULT_SOURCE: &str = "ABG.csv";

/// Runtime configuration for selection and refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inventory file path or HTTP(S) URL
    pub source: String,

    /// Records farther than this from the user are not shown
    pub radius_meters: f64,

    /// Maximum number of records handed to the renderer per refresh
    pub result_limit: usize,

    /// Minimum time between inventory refreshes
    pub refresh_interval_ms: u64,

    /// Column delimiter of the inventory file
    pub delimiter: char,

    /// Seed for marker colour assignment
    pub palette_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            radius_meters: DEFAULT_RADIUS_METERS,
            result_limit: DEFAULT_RESULT_LIMIT,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            delimiter: DEFAULT_DELIMITER,
            palette_seed: DEFAULT_PALETTE_SEED,
        }
    }
}

impl Config {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_radius_meters(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    pub fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }

    pub fn with_refresh_interval_ms(mut self, refresh_interval_ms: u64) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_palette_seed(mut self, palette_seed: u64) -> Self {
        self.palette_seed = palette_seed;
        self
    }

    /// Default config file location: `<config dir>/plant-proximity/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            PlantError::configuration("Could not determine user config directory")
        })?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a JSON config file; missing keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PlantError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Defaults, then the config file if given, then environment variables
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PLANT_PROXIMITY_*` overrides from a variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(format!("{}{}", ENV_PREFIX, name).as_str());

        if let Some(source) = var("SOURCE") {
            self.source = source;
        }
        if let Some(value) = var("RADIUS_METERS") {
            self.radius_meters = parse_env("RADIUS_METERS", &value)?;
        }
        if let Some(value) = var("RESULT_LIMIT") {
            self.result_limit = parse_env("RESULT_LIMIT", &value)?;
        }
        if let Some(value) = var("REFRESH_INTERVAL_MS") {
            self.refresh_interval_ms = parse_env("REFRESH_INTERVAL_MS", &value)?;
        }
        if let Some(value) = var("DELIMITER") {
            self.delimiter = parse_env_delimiter(&value)?;
        }
        if let Some(value) = var("PALETTE_SEED") {
            self.palette_seed = parse_env("PALETTE_SEED", &value)?;
        }

        Ok(())
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(PlantError::configuration("Inventory source cannot be empty"));
        }

        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(PlantError::configuration(format!(
                "Radius must be a positive number of meters, got {}",
                self.radius_meters
            )));
        }

        if self.result_limit == 0 {
            return Err(PlantError::configuration(
                "Result limit must be greater than 0",
            ));
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '\n' | '\r' | '"') {
            return Err(PlantError::configuration(format!(
                "Delimiter must be a single ASCII character other than a quote or line break, got {:?}",
                self.delimiter
            )));
        }

        Ok(())
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    /// Parser for the configured delimiter; call after [`Config::validate`]
    pub fn parser(&self) -> RecordParser {
        RecordParser::new().with_delimiter(self.delimiter as u8)
    }

    pub fn selector(&self) -> ProximitySelector {
        ProximitySelector::new(self.radius_meters, self.result_limit)
    }

    pub fn throttle(&self) -> RefreshThrottle {
        RefreshThrottle::from_millis(self.refresh_interval_ms)
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        PlantError::configuration(format!(
            "Invalid value for {}{}: '{}'",
            ENV_PREFIX, name, value
        ))
    })
}

/// Delimiters are taken verbatim so whitespace such as a tab survives
fn parse_env_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(PlantError::configuration(format!(
            "Invalid value for {}DELIMITER: {:?} (expected a single character)",
            ENV_PREFIX, value
        ))),
    }
}
