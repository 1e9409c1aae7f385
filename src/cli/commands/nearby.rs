//! Nearby command: rank plants around a single position

use super::shared::{RunSummary, load_configuration, now_ms, setup_logging};
use crate::Result;
use crate::cli::args::{NearbyArgs, OutputFormat};
use crate::config::Config;
use crate::refresh::{RefreshController, RefreshOutcome};
use crate::sink::{ConsoleSink, JsonLinesSink, RecordSink};
use std::time::Instant;
use tracing::info;

/// Run the nearby command
pub async fn run_nearby(args: NearbyArgs) -> Result<RunSummary> {
    let start_time = Instant::now();
    setup_logging(&args.common)?;

    let mut config = load_configuration(&args.common)?;
    if let Some(seed) = args.palette_seed {
        config.palette_seed = seed;
    }

    let position = args.position();
    info!("Finding plants near {} in {}", position, config.source);

    let mut summary = match args.common.format {
        OutputFormat::Human => {
            let sink = ConsoleSink::stdout(config.palette_seed);
            refresh_once(&config, sink, &args).await?
        }
        OutputFormat::Json => {
            let sink = JsonLinesSink::stdout(config.palette_seed);
            refresh_once(&config, sink, &args).await?
        }
    };

    summary.elapsed = start_time.elapsed();
    Ok(summary)
}

async fn refresh_once<K: RecordSink>(
    config: &Config,
    sink: K,
    args: &NearbyArgs,
) -> Result<RunSummary> {
    let mut controller = RefreshController::from_config(config, config.data_source(), sink);

    let mut summary = RunSummary {
        positions_processed: 1,
        ..Default::default()
    };

    // First update since startup, so the throttle always permits it
    if let RefreshOutcome::Refreshed(report) =
        controller.on_position(args.position(), now_ms()).await?
    {
        summary.refreshes = 1;
        summary.records_rendered = report.selected;
    }

    Ok(summary)
}
