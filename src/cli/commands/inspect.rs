//! Inspect command: parse an inventory and report what it contains

use super::shared::{RunSummary, load_configuration, setup_logging};
use crate::Result;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::models::PlantRecord;
use crate::parser::ParseStats;
use crate::source::InventorySource;
use colored::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::info;

/// Geographic extent of the retained records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn of(records: &[PlantRecord]) -> Option<Self> {
        let first = records.first()?;
        let init = BoundingBox {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };

        Some(records.iter().fold(init, |bbox, r| BoundingBox {
            min_lat: bbox.min_lat.min(r.latitude),
            max_lat: bbox.max_lat.max(r.latitude),
            min_lon: bbox.min_lon.min(r.longitude),
            max_lon: bbox.max_lon.max(r.longitude),
        }))
    }
}

/// Contents summary of one inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub source: String,
    pub stats: ParseStats,
    pub distinct_colour_keys: usize,
    pub distinct_genera: usize,
    pub bounding_box: Option<BoundingBox>,
}

impl InventoryReport {
    pub fn build(source: &str, records: &[PlantRecord], stats: ParseStats) -> Self {
        let colour_keys: BTreeSet<&str> = records.iter().map(|r| r.colour_key()).collect();
        let genera: BTreeSet<&str> = records.iter().map(|r| r.genus.as_str()).collect();

        Self {
            source: source.to_string(),
            stats,
            distinct_colour_keys: colour_keys.len(),
            distinct_genera: genera.len(),
            bounding_box: BoundingBox::of(records),
        }
    }

    fn print_human(&self) {
        println!("{}", "Inventory report".bright_green().bold());
        println!("  Source:            {}", self.source.bright_cyan());
        println!("  Data rows:         {}", self.stats.total_rows);
        println!(
            "  Records retained:  {} ({:.1}%)",
            self.stats.records_retained,
            self.stats.retention_rate()
        );
        println!("  Short rows padded: {}", self.stats.rows_padded);
        println!("  Rows dropped:      {}", self.stats.rows_dropped);
        println!("  Distinct species:  {}", self.distinct_colour_keys);
        println!("  Distinct genera:   {}", self.distinct_genera);
        match &self.bounding_box {
            Some(b) => println!(
                "  Extent:            lat {:.6}..{:.6}, lon {:.6}..{:.6}",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ),
            None => println!("  Extent:            {}", "no placeable records".yellow()),
        }
    }
}

/// Run the inspect command
pub async fn run_inspect(args: InspectArgs) -> Result<RunSummary> {
    let start_time = Instant::now();
    setup_logging(&args.common)?;

    let config = load_configuration(&args.common)?;
    let source = config.data_source();

    let raw_text = source.fetch().await?;
    let parsed = config.parser().parse_with_stats(&raw_text);
    let report = InventoryReport::build(&source.to_string(), &parsed.records, parsed.stats);

    info!(
        "Inspected {}: {} records retained",
        report.source, report.stats.records_retained
    );

    match args.common.format {
        OutputFormat::Human => report.print_human(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(RunSummary {
        elapsed: start_time.elapsed(),
        ..Default::default()
    })
}
