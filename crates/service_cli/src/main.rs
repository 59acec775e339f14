//! irb CLI - Command Line Operations for IRB Risk Weights
//!
//! Operational entry point for the `capital_core` calculator.
//!
//! # Commands
//!
//! - `irb compute --exposures <file>` - Compute metrics for every exposure in a CSV file
//! - `irb single --pd <f> --lgd <f> --ead <f>` - Compute metrics for one exposure
//! - `irb check` - Print the effective configuration and reference values

use std::path::PathBuf;

use capital_core::CalculatorConfig;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

use commands::output::OutputFormat;
pub use error::{CliError, Result};

/// IRB retail risk-weight calculator
#[derive(Parser)]
#[command(name = "irb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults are used when the file is absent)
    #[arg(short, long, global = true, default_value = "irb.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for every exposure in a CSV file (columns: id,pd,lgd,ead)
    Compute {
        /// Path to exposure CSV file
        #[arg(short, long)]
        exposures: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Abort on the first failing exposure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Compute metrics for a single exposure
    Single {
        /// Probability of default, in (0, 1)
        #[arg(long)]
        pd: f64,

        /// Loss given default, in [0, 1]
        #[arg(long)]
        lgd: f64,

        /// Exposure at default
        #[arg(long)]
        ead: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the effective configuration and reference values
    Check,
}

fn init_tracing(config: &CalculatorConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalculatorConfig::load_or_default(&cli.config)?.with_env_override()?;
    config.validate()?;

    init_tracing(&config, cli.verbose);
    debug!(path = %cli.config.display(), "configuration resolved");

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Compute {
            exposures,
            format,
            fail_fast,
        } => commands::compute::run(&config, &exposures, format, fail_fast),
        Commands::Single {
            pd,
            lgd,
            ead,
            format,
        } => commands::single::run(&config, pd, lgd, ead, format),
        Commands::Check => commands::check::run(&config),
    }
}
