//! Plant Proximity Library
//!
//! Finds the plants nearest to a GPS position in a fixed-column plant
//! inventory CSV, for display as camera-overlay markers.
//!
//! This library provides tools for:
//! - Parsing the inventory into typed records with pad-and-default semantics
//! - Ranking records by haversine distance with a radius filter and limit
//! - Throttling position-driven refreshes
//! - Fetching inventories from files or HTTP and handing results to sinks
//! - Deterministic species colour assignment for markers

pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod models;
pub mod palette;
pub mod parser;
pub mod refresh;
pub mod selector;
pub mod sink;
pub mod source;
pub mod throttle;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod track;
}

// Re-export commonly used types
pub use config::Config;
pub use error::{PlantError, Result};
pub use geo::{GeoPoint, haversine_distance};
pub use models::{PlantRecord, RankedRecord};
pub use parser::{RecordParser, parse_records};
pub use refresh::{RefreshController, RefreshOutcome, RefreshReport};
pub use selector::{ProximitySelector, select};
pub use sink::{DisplayDiff, MarkerSpec, RecordSink};
pub use source::{DataSource, InventorySource};
pub use throttle::RefreshThrottle;
