//! Recorded position tracks for replay
//!
//! A track is a text file with one `timestamp,latitude,longitude` line per
//! GPS fix. Timestamps are integer milliseconds or RFC 3339 datetimes.

use crate::error::{PlantError, Result};
use crate::geo::GeoPoint;
use chrono::DateTime;
use std::path::Path;

/// One recorded position update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub timestamp_ms: u64,
    pub position: GeoPoint,
}

/// Read and parse a track file
pub async fn load_track(path: &Path) -> Result<Vec<TrackPoint>> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_track(&content)
}

/// Parse track text, skipping blank lines and `#` comments
pub fn parse_track(content: &str) -> Result<Vec<TrackPoint>> {
    let mut points = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(PlantError::invalid_position(
                line_number,
                format!("expected 'timestamp,latitude,longitude', got '{}'", line),
            ));
        }

        let timestamp_ms = parse_timestamp(parts[0])
            .ok_or_else(|| PlantError::invalid_position(line_number, "invalid timestamp"))?;

        let latitude: f64 = parts[1]
            .parse()
            .map_err(|_| PlantError::invalid_position(line_number, "invalid latitude"))?;
        let longitude: f64 = parts[2]
            .parse()
            .map_err(|_| PlantError::invalid_position(line_number, "invalid longitude"))?;

        let position = GeoPoint::new(latitude, longitude);
        if !position.is_valid() {
            return Err(PlantError::invalid_position(
                line_number,
                format!("coordinates out of range: {}", position),
            ));
        }

        points.push(TrackPoint {
            timestamp_ms,
            position,
        });
    }

    Ok(points)
}

/// Milliseconds since the epoch from an integer or an RFC 3339 datetime
fn parse_timestamp(value: &str) -> Option<u64> {
    if let Ok(ms) = value.parse::<u64>() {
        return Some(ms);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .and_then(|dt| u64::try_from(dt.timestamp_millis()).ok())
}
