//! Shared fixtures for sink tests

use crate::models::{PlantRecord, RankedRecord};


/// Ranked record with the given id and distance
pub fn ranked(id: &str, distance_meters: f64) -> RankedRecord {
    RankedRecord::new(
        PlantRecord {
            id: id.to_string(),
            common_name: format!("Plant {}", id),
            common_name_alt: String::new(),
            genus: "Acer".to_string(),
            species: "rubrum".to_string(),
            longitude: -75.0,
            latitude: 40.0,
            height_meters: 1.0,
        },
        distance_meters,
    )
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
