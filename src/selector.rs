//! Proximity selection over parsed plant records.
//!
//! Given a reference point, computes each record's haversine distance, keeps
//! the records within the radius, orders them nearest first and truncates to
//! a result limit. Selection is pure and is re-run in full on every refresh.

use crate::constants::{DEFAULT_RADIUS_METERS, DEFAULT_RESULT_LIMIT};
use crate::geo::{GeoPoint, haversine_distance};
use crate::models::{PlantRecord, RankedRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Radius and limit for proximity selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximitySelector {
    pub radius_meters: f64,
    pub limit: usize,
}

impl ProximitySelector {
    pub fn new(radius_meters: f64, limit: usize) -> Self {
        Self {
            radius_meters,
            limit,
        }
    }

    /// Select the nearest records to `reference`
    pub fn select(&self, reference: &GeoPoint, records: &[PlantRecord]) -> Vec<RankedRecord> {
        select(reference, records, self.radius_meters, self.limit)
    }
}

impl Default for ProximitySelector {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_METERS, DEFAULT_RESULT_LIMIT)
    }
}

/// Rank records by distance from `reference`
///
/// Keeps records with `distance <= radius_meters`, sorts ascending by
/// distance with ties kept in input order, and returns at most `limit`
/// entries. NaN distances never pass the radius filter.
pub fn select(
    reference: &GeoPoint,
    records: &[PlantRecord],
    radius_meters: f64,
    limit: usize,
) -> Vec<RankedRecord> {
    let mut ranked: Vec<RankedRecord> = records
        .iter()
        .filter_map(|record| {
            let distance = haversine_distance(reference, &record.position());
            (distance <= radius_meters).then(|| RankedRecord::new(record.clone(), distance))
        })
        .collect();

    let in_radius = ranked.len();

    // sort_by is stable, so equal distances keep input order
    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked.truncate(limit);

    debug!(
        "Selected {} of {} records ({} within {}m of {})",
        ranked.len(),
        records.len(),
        in_radius,
        radius_meters,
        reference
    );

    ranked
}
