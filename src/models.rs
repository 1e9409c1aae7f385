//! Core data structures for plant proximity.
//!
//! Defines the parsed plant record, its ranked form produced by the
//! proximity selector, and helpers for composing display values.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A single plant parsed from one inventory row
///
/// Records are re-parsed from scratch on every refresh and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: String,
    pub common_name: String,
    pub common_name_alt: String,
    pub genus: String,
    pub species: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Marker height hint for renderers (column 10, defaults to 1.0)
    pub height_meters: f64,
}

impl PlantRecord {
    /// The record's position as a point
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Check the retention invariant
    ///
    /// Zero coordinates mark missing or unparsable values, so a record at
    /// exactly 0.0 latitude or longitude is treated as unplaced.
    pub fn is_placeable(&self) -> bool {
        !self.id.is_empty() && self.latitude != 0.0 && self.longitude != 0.0
    }

    /// Display label shown when a marker is selected
    ///
    /// `"{alt}, {common}"` when an alternate name exists, otherwise the
    /// common name alone.
    pub fn label(&self) -> String {
        if self.common_name_alt.is_empty() {
            self.common_name.clone()
        } else {
            format!("{}, {}", self.common_name_alt, self.common_name)
        }
    }

    /// Key used to pick a marker colour: species, falling back to genus
    pub fn colour_key(&self) -> &str {
        if self.species.is_empty() {
            &self.genus
        } else {
            &self.species
        }
    }
}

/// A plant record with its distance from a reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: PlantRecord,
    pub distance_meters: f64,
}

impl RankedRecord {
    pub fn new(record: PlantRecord, distance_meters: f64) -> Self {
        Self {
            record,
            distance_meters,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}
