//! Rendering sinks for ranked records.
//!
//! A sink is the display side of a refresh: it receives the user's position
//! on every update and the ranked records after every successful refresh.
//! Marker identity is keyed by record id; [`MarkerTracker`] computes which
//! markers to create, move, or remove between refreshes.

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::models::RankedRecord;
use crate::palette::SpeciesPalette;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod console;
pub mod json_lines;

#[cfg(test)]
pub mod tests;

pub use console::ConsoleSink;
pub use json_lines::JsonLinesSink;

/// Receiver of position updates and refresh results
pub trait RecordSink {
    /// Called for every position update, throttled or not
    fn update_user_position(&mut self, position: &GeoPoint) -> Result<()>;

    /// Called once per successful refresh with records nearest first
    fn render(&mut self, ranked: &[RankedRecord]) -> Result<()>;
}

/// Everything a renderer needs to place one plant marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub genus: String,
    pub species: String,
    pub colour: String,
    pub height_meters: f64,
    pub distance_meters: f64,
}

impl MarkerSpec {
    pub fn from_ranked(ranked: &RankedRecord, palette: &mut SpeciesPalette) -> Self {
        let record = &ranked.record;
        Self {
            id: record.id.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            label: record.label(),
            genus: record.genus.clone(),
            species: record.species.clone(),
            colour: palette.colour_for_record(record),
            height_meters: record.height_meters,
            distance_meters: ranked.distance_meters,
        }
    }
}

/// Marker changes between two consecutive refreshes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDiff {
    /// Ids not displayed before, in ranked order
    pub added: Vec<String>,
    /// Ids already displayed whose position is refreshed, in ranked order
    pub moved: Vec<String>,
    /// Ids no longer in the ranked list, in previous display order
    pub removed: Vec<String>,
}

impl DisplayDiff {
    /// Diff the previously displayed ids against a new ranked list
    pub fn between(previous: &[String], ranked: &[RankedRecord]) -> Self {
        let previous_set: HashSet<&str> = previous.iter().map(String::as_str).collect();
        let current_set: HashSet<&str> = ranked.iter().map(|r| r.id()).collect();

        let mut diff = DisplayDiff::default();
        for record in ranked {
            if previous_set.contains(record.id()) {
                diff.moved.push(record.id().to_string());
            } else {
                diff.added.push(record.id().to_string());
            }
        }
        diff.removed = previous
            .iter()
            .filter(|id| !current_set.contains(id.as_str()))
            .cloned()
            .collect();

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }
}

/// Remembers which record ids are currently displayed
#[derive(Debug, Clone, Default)]
pub struct MarkerTracker {
    displayed: Vec<String>,
}

impl MarkerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff against the displayed set and adopt the new ranked list
    pub fn apply(&mut self, ranked: &[RankedRecord]) -> DisplayDiff {
        let diff = DisplayDiff::between(&self.displayed, ranked);
        self.displayed = ranked.iter().map(|r| r.id().to_string()).collect();
        diff
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }
}
