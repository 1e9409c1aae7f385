//! Command implementations for the plant proximity CLI
//!
//! Each subcommand lives in its own module:
//! - `nearby`: rank plants around a single position
//! - `replay`: feed a recorded track through the throttled refresh loop
//! - `inspect`: parse an inventory and report statistics

pub mod inspect;
pub mod nearby;
pub mod replay;
pub mod shared;

pub use shared::RunSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand selected on the command line
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<RunSummary> {
    args.validate()?;

    match args.command {
        Some(Commands::Nearby(nearby_args)) => nearby::run_nearby(nearby_args).await,
        Some(Commands::Replay(replay_args)) => {
            replay::run_replay(replay_args, cancellation_token).await
        }
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => Ok(RunSummary::default()),
    }
}
