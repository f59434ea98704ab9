//! Token Enrichment
//!
//! Turns one discovered mint plus its metadata entry into a scored report.
//! Lookup failures degrade to defaults (zero supply, no holders) so a flaky
//! provider lowers data quality but never aborts a scan. Tokens without a
//! usable display identity are dropped entirely.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::scoring::{
    age_score, composite_score, dev_holdings_score, holder_score, liquidity_score,
};
use crate::domain::{generate_flags, round2, RiskLevel, TokenReport};
use crate::ports::token_data::{TokenDataPort, TokenMetadata};

/// Estimated liquidity per holder in USD, a rough proxy until real pool
/// data is wired in
pub const LIQUIDITY_PER_HOLDER_USD: f64 = 150.0;

/// Age assumed when metadata carries no usable timestamp (hours)
pub const DEFAULT_AGE_HOURS: f64 = 48.0;

/// Placeholder name rejected as a display identity
const UNKNOWN_NAME: &str = "Unknown";

/// Placeholder symbol rejected as a display identity
const UNKNOWN_SYMBOL: &str = "???";

/// Enriches discovered mints into scored reports
pub struct TokenEnricher<S: TokenDataPort> {
    source: Arc<S>,
}

impl<S: TokenDataPort> TokenEnricher<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Enrich one mint into a report. Returns None when the metadata entry
    /// is missing or carries no usable name and symbol; in that case no
    /// further lookups are made for the mint.
    pub async fn enrich(
        &self,
        mint: &str,
        metadata: Option<&TokenMetadata>,
    ) -> Option<TokenReport> {
        let prefix: String = mint.chars().take(8).collect();
        tracing::debug!("Analyzing token: {}...", prefix);

        let metadata = metadata?;
        let (name, symbol) = display_identity(metadata)?;

        let supply = match self.source.token_supply(mint).await {
            Ok(supply) => supply,
            Err(e) => {
                tracing::warn!("Supply lookup failed for {}: {}", mint, e);
                Default::default()
            }
        };

        let holders = match self.source.token_largest_accounts(mint).await {
            Ok(holders) => holders,
            Err(e) => {
                tracing::warn!("Holder lookup failed for {}: {}", mint, e);
                Vec::new()
            }
        };

        let holder_count = holders.len() as u64;
        let dev_holdings = if supply.amount > 0 {
            holders
                .first()
                .map(|h| h.amount as f64 / supply.amount as f64 * 100.0)
                .unwrap_or(0.0)
        } else {
            0.0
        };
        let age_hours = age_from_metadata(metadata, Utc::now().timestamp() as f64);
        let liquidity = holder_count as f64 * LIQUIDITY_PER_HOLDER_USD;

        let score = composite_score(
            holder_score(holder_count as f64),
            age_score(age_hours),
            dev_holdings_score(dev_holdings),
            liquidity_score(liquidity),
        );

        Some(TokenReport {
            address: mint.to_string(),
            name,
            symbol,
            score: round2(score),
            risk_level: RiskLevel::from_score(score),
            holders: holder_count,
            age_hours: round2(age_hours),
            dev_holdings: round2(dev_holdings),
            liquidity: round2(liquidity),
            flags: generate_flags(holder_count, age_hours, dev_holdings, liquidity),
        })
    }
}

/// Extract trimmed name and symbol, rejecting placeholder and empty values
fn display_identity(metadata: &TokenMetadata) -> Option<(String, String)> {
    let fields = metadata
        .on_chain_metadata
        .as_ref()?
        .metadata
        .as_ref()?
        .data
        .as_ref()?;

    let name = fields
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != UNKNOWN_NAME)?;
    let symbol = fields
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != UNKNOWN_SYMBOL)?;

    Some((name.to_string(), symbol.to_string()))
}

/// Age in hours from the metadata update timestamp. Non-numeric or missing
/// timestamps fall back to the default; future timestamps clamp to zero.
fn age_from_metadata(metadata: &TokenMetadata, now_secs: f64) -> f64 {
    metadata
        .on_chain_metadata
        .as_ref()
        .and_then(|oc| oc.updated_at.as_ref())
        .and_then(|v| v.as_f64())
        .map(|ts| ((now_secs - ts) / 3600.0).max(0.0))
        .unwrap_or(DEFAULT_AGE_HOURS)
}
