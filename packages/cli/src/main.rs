#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Console diagnostics for the ward flood risk datasets.
//!
//! `inspect` and `check-risk` load the CSV sources the same way the server
//! does and print what the engine sees; `serve` starts the HTTP server.

mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flood_risk_dataset::{DatasetContext, DatasetPaths};
use flood_risk_ward::WardDirectory;

#[derive(Parser)]
#[command(name = "flood_risk_cli", about = "Ward flood risk diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show table columns, sample ward ids, rejected rows, and the first
    /// joined rows
    Inspect {
        /// Directory holding the CSV files (overrides `FLOOD_RISK_DATA_DIR`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List wards whose rainfall intensity approaches or exceeds drain
    /// capacity
    CheckRisk {
        /// Directory holding the CSV files (overrides `FLOOD_RISK_DATA_DIR`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Report wards whose intensity/capacity ratio exceeds this value
        #[arg(long, default_value = "0.5")]
        threshold: f64,
    },
    /// Start the HTTP server
    Serve,
}

fn load(data_dir: Option<PathBuf>) -> DatasetContext {
    let paths = data_dir.map_or_else(DatasetPaths::from_env, DatasetPaths::in_dir);
    log::debug!("Loading datasets from {paths:?}");
    DatasetContext::load(&paths)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { data_dir } => {
            let dataset = load(data_dir);
            report::inspect(&dataset, &mut std::io::stdout().lock())?;
        }
        Commands::CheckRisk {
            data_dir,
            threshold,
        } => {
            let dataset = load(data_dir);
            let directory = WardDirectory::builtin();
            report::check_risk(&dataset, &directory, threshold, &mut std::io::stdout().lock())?;
        }
        Commands::Serve => {
            actix_web::rt::System::new().block_on(flood_risk_server::run_server())?;
        }
    }

    Ok(())
}
