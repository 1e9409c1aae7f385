//! Replay command: feed a recorded track through the refresh loop
//!
//! Each track point is delivered as a position update with its recorded
//! timestamp, so throttling behaves as it would have on device. Fetch
//! failures are logged and counted; the replay continues with the next
//! position.

use super::shared::{RunSummary, load_configuration, setup_logging};
use crate::cli::args::{OutputFormat, ReplayArgs};
use crate::cli::track::{TrackPoint, load_track};
use crate::config::Config;
use crate::error::{PlantError, Result};
use crate::refresh::{RefreshController, RefreshOutcome};
use crate::sink::{ConsoleSink, JsonLinesSink, RecordSink};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the replay command
pub async fn run_replay(
    args: ReplayArgs,
    cancellation_token: CancellationToken,
) -> Result<RunSummary> {
    let start_time = Instant::now();
    setup_logging(&args.common)?;

    let mut config = load_configuration(&args.common)?;
    if let Some(interval_ms) = args.interval_ms {
        config.refresh_interval_ms = interval_ms;
    }
    if let Some(seed) = args.palette_seed {
        config.palette_seed = seed;
    }

    let track = load_track(&args.track).await?;
    info!(
        "Replaying {} positions from {} against {}",
        track.len(),
        args.track.display(),
        config.source
    );

    // Tables go to stdout, so only draw progress alongside JSON output
    let progress_bar = (args.common.show_progress() && args.common.format == OutputFormat::Json)
        .then(|| create_progress_bar(track.len() as u64));

    let mut summary = match args.common.format {
        OutputFormat::Human => {
            let sink = ConsoleSink::stdout(config.palette_seed);
            replay_track(&config, sink, &track, progress_bar.as_ref(), &cancellation_token).await?
        }
        OutputFormat::Json => {
            let sink = JsonLinesSink::stdout(config.palette_seed);
            replay_track(&config, sink, &track, progress_bar.as_ref(), &cancellation_token).await?
        }
    };

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Replay complete");
    }

    summary.elapsed = start_time.elapsed();
    if args.common.format == OutputFormat::Human && !args.common.quiet {
        summary.print();
    }

    Ok(summary)
}

/// Deliver every track point to a controller built from `config`
pub async fn replay_track<K: RecordSink>(
    config: &Config,
    sink: K,
    track: &[TrackPoint],
    progress_bar: Option<&ProgressBar>,
    cancellation_token: &CancellationToken,
) -> Result<RunSummary> {
    let mut controller = RefreshController::from_config(config, config.data_source(), sink);
    let mut summary = RunSummary::default();

    for point in track {
        if cancellation_token.is_cancelled() {
            return Err(PlantError::interrupted("Replay cancelled"));
        }

        summary.positions_processed += 1;

        match controller.on_position(point.position, point.timestamp_ms).await {
            Ok(RefreshOutcome::Throttled) => summary.throttled += 1,
            Ok(RefreshOutcome::Refreshed(report)) => {
                summary.refreshes += 1;
                summary.records_rendered += report.selected;
            }
            Err(e @ PlantError::SourceFetch { .. }) => {
                warn!("Refresh at {}ms failed: {}", point.timestamp_ms, e);
                summary.fetch_failures += 1;
            }
            Err(e) => return Err(e),
        }

        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
    }

    Ok(summary)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Replaying positions");
    pb
}
