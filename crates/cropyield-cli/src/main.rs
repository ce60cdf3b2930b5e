//! cropyield - crop yield prediction from the terminal
//!
//! Usage:
//!   cropyield explore                          # Dataset overview and feature ranges
//!   cropyield train --show-test                # Fit, score and list test predictions
//!   cropyield predict --nitrogen 150 --rainfall 750 --temperature 26
//!   cropyield export -o yield_predictions.csv  # Table plus Predicted_Yield column
//!
//! Settings come from `--config`, then `CROPYIELD_*` environment variables,
//! then the flags below.

use clap::{ArgAction, Parser, Subcommand};
use cropyield::data::Features;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod output;

use commands::{explore, export, predict, resolve_config, train, Overrides};

/// cropyield - linear crop yield model
///
/// Predicts crop yield (tons/ha) from nitrogen, rainfall and temperature.
#[derive(Parser)]
#[command(name = "cropyield")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CSV file with Nitrogen_Level, Rainfall, Avg_Temp and Yield columns
    #[arg(long, global = true, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Seed for the train/test split
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Share of rows held out for testing, in (0, 1)
    #[arg(long, global = true)]
    split_fraction: Option<f64>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset shape, yield statistics and feature ranges
    Explore,

    /// Fit the model and report R², RMSE and coefficients
    Train {
        /// Print actual vs predicted yield for every test row
        #[arg(long)]
        show_test: bool,
    },

    /// Predict yield for one set of field conditions
    Predict {
        /// Nitrogen level, kg/ha
        #[arg(long, default_value_t = 150.0)]
        nitrogen: f64,

        /// Rainfall, mm
        #[arg(long, default_value_t = 750.0)]
        rainfall: f64,

        /// Average temperature, °C
        #[arg(long, default_value_t = 26.0, allow_negative_numbers = true)]
        temperature: f64,
    },

    /// Write the dataset with a Predicted_Yield column
    Export {
        /// Output CSV path
        #[arg(short, long, default_value = "yield_predictions.csv")]
        output: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let overrides = Overrides {
        data: cli.data,
        seed: cli.seed,
        split_fraction: cli.split_fraction,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Explore => explore::run(&config, cli.json),
        Commands::Train { show_test } => train::run(&config, show_test, cli.json),
        Commands::Predict {
            nitrogen,
            rainfall,
            temperature,
        } => predict::run(
            &config,
            Features::new(nitrogen, rainfall, temperature),
            cli.json,
        ),
        Commands::Export { output } => export::run(&config, &output, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
