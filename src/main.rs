//! Pumpscan - Pump.fun Token Scanner
//!
//! Discovers recently launched pump.fun tokens via the Helius API and writes
//! a scored, sorted report to disk.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pumpscan::adapters::cli::CliApp;
use pumpscan::adapters::helius::{HeliusClient, HeliusConfig};
use pumpscan::application::{ScanConfig, TokenScanner};
use pumpscan::config::load_config;
use pumpscan::domain::ScanResult;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let config = load_config(&app.config).with_context(|| {
        format!("Failed to load configuration from {}", app.config.display())
    })?;

    init_logging(&config.logging.level, app.debug, app.quiet);

    if config.helius.get_api_key().is_none() {
        bail!(
            "No Helius API key configured\n\n\
             Set the HELIUS_API_KEY environment variable (a .env file works too),\n\
             or set 'api_key' under [helius] in {}.\n\n\
             Free keys are available at https://dev.helius.xyz",
            app.config.display()
        );
    }

    let client =
        HeliusClient::new(HeliusConfig::from(&config)).context("Failed to create Helius client")?;

    let mut scan_config = ScanConfig::from(&config);
    if let Some(max_tokens) = app.max_tokens {
        scan_config.max_tokens = max_tokens;
    }

    print_banner("PUMP.FUN TOKEN SCANNER");

    let scanner = TokenScanner::new(scan_config, Arc::new(client));
    let result = scanner.run_scan().await;

    print_scan_stats(&result);

    // Expand ~ in the configured path; CLI overrides are taken as-is
    let output_path: PathBuf = match app.output {
        Some(path) => path,
        None => shellexpand::tilde(&config.output.path).to_string().into(),
    };
    result
        .write_json(&output_path)
        .with_context(|| format!("Failed to write results to {}", output_path.display()))?;
    println!("Results written to: {}", output_path.display());

    print_top_opportunities(&result);

    Ok(())
}

/// Initialize logging. RUST_LOG wins when set; otherwise the CLI flags
/// override the configured level.
fn init_logging(level: &str, debug: bool, quiet: bool) {
    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        level
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}\n", "=".repeat(60));
}

fn print_scan_stats(result: &ScanResult) {
    println!("\n{}", "=".repeat(60));
    println!("SCAN COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Total tokens scanned: {}", result.stats.total_scanned);
    println!("Opportunities found: {}", result.stats.opportunities);
    println!("Average score: {:.2}", result.stats.avg_score);
    println!(
        "Total liquidity: ${}",
        format_usd(result.stats.total_liquidity)
    );
    println!("{}\n", "=".repeat(60));
}

fn print_top_opportunities(result: &ScanResult) {
    if result.tokens.is_empty() {
        return;
    }

    println!("\nTOP OPPORTUNITIES:\n");
    for (i, token) in result.tokens.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, token.name, token.symbol);
        println!(
            "   Score: {:.2}/100 | Risk: {}",
            token.score,
            token.risk_level.label().to_uppercase()
        );
        println!(
            "   Holders: {} | Age: {:.1}h",
            token.holders, token.age_hours
        );
        println!(
            "   Dev Holdings: {:.1}% | Liquidity: ${}",
            token.dev_holdings,
            format_usd(token.liquidity)
        );
        println!("   Address: {}", token.address);
        for flag in token.flags.iter().take(3) {
            println!("   - {}", flag.text);
        }
        println!();
    }
}

/// Format a USD amount with thousands separators and two decimals
fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents_total = (amount.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}.{:02}", grouped, cents)
    } else {
        format!("{}.{:02}", grouped, cents)
    }
}
