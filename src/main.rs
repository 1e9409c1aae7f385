use anyhow::Context;
use clap::Parser;
use plant_proximity::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run_cli(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Run the selected subcommand on a tokio runtime, cancelling on CTRL+C
fn run_cli(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result.context("Command failed")?;
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                anyhow::bail!(plant_proximity::PlantError::interrupted("Interrupted by user"));
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Plant Proximity - nearest plants for a GPS position");
    println!("===================================================");
    println!();
    println!("USAGE:");
    println!("    plant_proximity <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    nearby     List the plants nearest to a single position");
    println!("    replay     Replay a recorded position track through the refresh loop");
    println!("    inspect    Parse an inventory and report row statistics");
    println!("    help       Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Plants within 100 m of a position:");
    println!("    plant_proximity nearby --lat 40.0 --lon -75.0 --source ABG.csv");
    println!();
    println!("    # Replay a walk with a 10 s refresh interval, JSON output:");
    println!("    plant_proximity replay walk.csv --interval-ms 10000 --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    plant_proximity <COMMAND> --help");
}
