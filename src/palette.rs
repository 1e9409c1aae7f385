//! Species colour assignment for map markers.
//!
//! Each distinct colour key (species, or genus when the species is blank)
//! receives a hue the first time it is seen. Hues come from a seeded
//! generator, so the same seed and the same order of keys always produce
//! the same colours.

use crate::constants::{PALETTE_LIGHTNESS, PALETTE_SATURATION};
use crate::models::PlantRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::trace;

/// Seeded mapping from colour key to a CSS `hsl()` colour
#[derive(Debug, Clone)]
pub struct SpeciesPalette {
    rng: StdRng,
    colours: HashMap<String, String>,
}

impl SpeciesPalette {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            colours: HashMap::new(),
        }
    }

    /// Colour for a key, assigning a new hue on first use
    pub fn colour_for(&mut self, key: &str) -> &str {
        if !self.colours.contains_key(key) {
            let hue: u16 = self.rng.gen_range(0..360);
            let colour = format!(
                "hsl({}, {}%, {}%)",
                hue, PALETTE_SATURATION, PALETTE_LIGHTNESS
            );
            trace!("Assigned {} to {}", colour, key);
            self.colours.insert(key.to_string(), colour);
        }

        &self.colours[key]
    }

    /// Colour for a record's species, falling back to its genus
    pub fn colour_for_record(&mut self, record: &PlantRecord) -> String {
        self.colour_for(record.colour_key()).to_string()
    }

    /// Colour previously assigned to a key, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.colours.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
