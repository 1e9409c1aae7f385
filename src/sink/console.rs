//! Human-readable table output for ranked records

use super::{MarkerSpec, MarkerTracker, RecordSink};
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::models::RankedRecord;
use crate::palette::SpeciesPalette;
use colored::*;
use std::io::{self, Stdout, Write};
use tracing::trace;

/// Prints one table per refresh
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
    palette: SpeciesPalette,
    tracker: MarkerTracker,
    user_position: Option<GeoPoint>,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(palette_seed: u64) -> Self {
        Self::new(io::stdout(), palette_seed)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, palette_seed: u64) -> Self {
        Self {
            out,
            palette: SpeciesPalette::new(palette_seed),
            tracker: MarkerTracker::new(),
            user_position: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for ConsoleSink<W> {
    fn update_user_position(&mut self, position: &GeoPoint) -> Result<()> {
        trace!("User position {}", position);
        self.user_position = Some(*position);
        Ok(())
    }

    fn render(&mut self, ranked: &[RankedRecord]) -> Result<()> {
        let diff = self.tracker.apply(ranked);

        let origin = self
            .user_position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unknown position".to_string());

        writeln!(
            self.out,
            "{} {} {}",
            "Nearby plants from".bright_green().bold(),
            origin.bright_cyan(),
            format!(
                "({} shown, +{} ~{} -{})",
                ranked.len(),
                diff.added.len(),
                diff.moved.len(),
                diff.removed.len()
            )
            .bright_black()
        )?;

        if ranked.is_empty() {
            writeln!(self.out, "  {}", "No plants within range".yellow())?;
            return Ok(());
        }

        for (rank, record) in ranked.iter().enumerate() {
            let marker = MarkerSpec::from_ranked(record, &mut self.palette);
            writeln!(
                self.out,
                "  {:>2}. {:>8.1} m  {:<10} {}  {} {}  {}",
                (rank + 1).to_string().bright_yellow(),
                marker.distance_meters,
                marker.id.bright_white().bold(),
                marker.label,
                marker.genus.italic(),
                marker.species.italic(),
                marker.colour.bright_black()
            )?;
        }

        Ok(())
    }
}
