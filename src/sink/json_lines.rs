//! Machine-readable output: one JSON document per refresh

use super::{DisplayDiff, MarkerSpec, MarkerTracker, RecordSink};
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::models::RankedRecord;
use crate::palette::SpeciesPalette;
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout, Write};

/// A single refresh as written by [`JsonLinesSink`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshFrame {
    pub user_position: Option<GeoPoint>,
    pub markers: Vec<MarkerSpec>,
    pub diff: DisplayDiff,
}

/// Writes newline-delimited [`RefreshFrame`]s
pub struct JsonLinesSink<W: Write = Stdout> {
    out: W,
    palette: SpeciesPalette,
    tracker: MarkerTracker,
    user_position: Option<GeoPoint>,
}

impl JsonLinesSink<Stdout> {
    pub fn stdout(palette_seed: u64) -> Self {
        Self::new(io::stdout(), palette_seed)
    }
}

impl<W: Write> JsonLinesSink<W> {
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

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn update_user_position(&mut self, position: &GeoPoint) -> Result<()> {
        self.user_position = Some(*position);
        Ok(())
    }

    fn render(&mut self, ranked: &[RankedRecord]) -> Result<()> {
        let frame = RefreshFrame {
            user_position: self.user_position,
            markers: ranked
                .iter()
                .map(|r| MarkerSpec::from_ranked(r, &mut self.palette))
                .collect(),
            diff: self.tracker.apply(ranked),
        };

        serde_json::to_writer(&mut self.out, &frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
