//! CLI Definition
//!
//! Argument parsing for the scanner binary. The scan itself is wired up in
//! main; this module only defines the surface.

use clap::Parser;
use std::path::PathBuf;

/// Pumpscan - Pump.fun token scanner
#[derive(Parser, Debug)]
#[command(
    name = "pumpscan",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Scans recent pump.fun token launches and scores them",
    long_about = "Pumpscan discovers recently launched pump.fun tokens via the Helius API and \
                  ranks them by holder base, age, dev holdings and estimated liquidity."
)]
pub struct CliApp {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the output path for the scan result JSON
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the maximum number of tokens to analyze
    #[arg(long, value_name = "COUNT")]
    pub max_tokens: Option<usize>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}
