//! Scan Orchestrator
//!
//! Runs one full scan: discover candidate mints, batch-fetch their
//! metadata, enrich each mint with paced lookups, and assemble the sorted
//! result. An empty discovery or an empty metadata batch short-circuits to
//! an empty result instead of erroring.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ScanResult;
use crate::ports::token_data::TokenDataPort;

use super::discovery::DiscoveryPipeline;
use super::enricher::TokenEnricher;

/// Pump.fun bonding curve program
pub const PUMP_FUN_PROGRAM: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

/// Default number of tokens to analyze per scan
pub const DEFAULT_MAX_TOKENS: usize = 20;

/// Default number of fallback transactions to inspect
pub const DEFAULT_TRANSACTION_LIMIT: usize = 100;

/// Default pause between per-token lookups
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(100);

/// Scan parameters
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Program whose created assets are scanned
    pub program_address: String,

    /// Maximum number of tokens to analyze
    pub max_tokens: usize,

    /// Number of fallback transactions to inspect
    pub transaction_limit: usize,

    /// Pause between per-token lookups
    pub pacing_delay: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            program_address: PUMP_FUN_PROGRAM.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            transaction_limit: DEFAULT_TRANSACTION_LIMIT,
            pacing_delay: DEFAULT_PACING_DELAY,
        }
    }
}

/// Full scan pipeline over a token data source
pub struct TokenScanner<S: TokenDataPort> {
    config: ScanConfig,
    source: Arc<S>,
}

impl<S: TokenDataPort> TokenScanner<S> {
    /// Create a new scanner
    pub fn new(config: ScanConfig, source: Arc<S>) -> Self {
        Self { config, source }
    }

    /// Run one full scan
    pub async fn run_scan(&self) -> ScanResult {
        tracing::info!(
            "Starting scan of {} (up to {} tokens)",
            self.config.program_address,
            self.config.max_tokens
        );

        let discovery = DiscoveryPipeline::new(
            Arc::clone(&self.source),
            self.config.program_address.clone(),
            self.config.max_tokens,
            self.config.transaction_limit,
        );

        let mints = discovery.resolve().await;
        if mints.is_empty() {
            tracing::warn!("No tokens discovered");
            return ScanResult::empty();
        }

        let metadata_map = match self.source.token_metadata_batch(&mints).await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Metadata batch failed: {}", e);
                return ScanResult::empty();
            }
        };
        if metadata_map.is_empty() {
            tracing::warn!("No metadata available for discovered tokens");
            return ScanResult::empty();
        }
        tracing::info!("Retrieved metadata for {} tokens", metadata_map.len());

        let enricher = TokenEnricher::new(Arc::clone(&self.source));
        let mut reports = Vec::new();
        for (i, mint) in mints.iter().enumerate() {
            if let Some(report) = enricher.enrich(mint, metadata_map.get(mint)).await {
                reports.push(report);
            }
            // Pace the per-token RPC lookups, no pause after the last one
            if i + 1 < mints.len() && !self.config.pacing_delay.is_zero() {
                tokio::time::sleep(self.config.pacing_delay).await;
            }
        }

        tracing::info!(
            "Scan complete: {} of {} tokens produced reports",
            reports.len(),
            mints.len()
        );
        ScanResult::from_reports(reports)
    }
}
