// ABOUTME: Command-line runner for chart computation and legacy-versus-CMS parity checks
// ABOUTME: Reads a JSON chart request and prints the chart or the parity report as JSON
//! Usage:
//! ```bash
//! # Compute a chart on the path the cut-over configuration selects
//! cargo run --bin vitals-parity -- compute --request request.json
//!
//! # Compare legacy and CMS results, failing on the first disagreement
//! cargo run --bin vitals-parity -- parity --request request.json --strict
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use vitals_parity::config::{ParityMode, VitalsConfig};
use vitals_parity::cutover::StrategyCutOverService;
use vitals_parity::logging::LoggingConfig;
use vitals_parity::request::ChartRequest;

#[derive(Parser)]
#[command(
    name = "vitals-parity",
    about = "Vitals chart computation and parity validation",
    long_about = "Compute health metric charts from legacy records or canonical metric series, and validate that both paths agree."
)]
struct VitalsArgs {
    #[command(subcommand)]
    command: VitalsCommand,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum VitalsCommand {
    /// Compute the requested chart on the selected path
    Compute {
        /// Chart request file (JSON)
        #[arg(long)]
        request: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Compute the requested chart on both paths and compare them
    Parity {
        /// Chart request file (JSON)
        #[arg(long)]
        request: PathBuf,

        /// Fail with an error instead of reporting the disagreement
        #[arg(long)]
        strict: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let args = VitalsArgs::parse();

    let logging = LoggingConfig::from_env();
    let logging = if args.verbose {
        logging.verbose()
    } else {
        logging
    };
    logging.init()?;

    match args.command {
        VitalsCommand::Compute { request, pretty } => {
            let request = ChartRequest::from_path(&request)?;
            let config = request.resolve_config(VitalsConfig::from_env()?)?;
            let strategy = request.strategy;
            let context = request.into_context(&config)?;

            let service = StrategyCutOverService::new(config);
            let chart = service.compute(&context, strategy)?;
            if chart.is_none() {
                info!(strategy = %strategy, "no data in the requested window");
            }
            print_json(&chart, pretty)?;
        }
        VitalsCommand::Parity {
            request,
            strict,
            pretty,
        } => {
            let request = ChartRequest::from_path(&request)?;
            let mut config = request.resolve_config(VitalsConfig::from_env()?)?;
            if strict {
                config.parity.mode = ParityMode::Strict;
            }
            let strategy = request.strategy;
            let context = request.into_context(&config)?;

            let service = StrategyCutOverService::new(config);
            let run = service.execute_with_parity(&context, strategy)?;
            print_json(&run.report, pretty)?;

            if !run.report.passed {
                warn!(strategy = %strategy, "parity check failed");
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
