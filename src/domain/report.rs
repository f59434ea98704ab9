//! Scan Reports
//!
//! Assembled output of a scan run: per-token reports, aggregate statistics
//! and JSON persistence. Tokens are ordered by descending score so the top
//! of the file is the top of the leaderboard.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::flags::Flag;
use super::scoring::{round2, RiskLevel, OPPORTUNITY_SCORE};

/// Errors from writing a scan result to disk
#[derive(Error, Debug)]
pub enum ReportError {
    /// Filesystem failure creating directories or writing the file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Result could not be serialized to JSON
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Fully scored report for one token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    /// Mint address
    pub address: String,

    /// Token name from on-chain metadata
    pub name: String,

    /// Token symbol from on-chain metadata
    pub symbol: String,

    /// Composite score, rounded to two decimals
    pub score: f64,

    /// Risk classification derived from the composite score
    pub risk_level: RiskLevel,

    /// Number of holder accounts observed
    pub holders: u64,

    /// Token age in hours, rounded to two decimals
    pub age_hours: f64,

    /// Largest holder's share of supply in percent, rounded to two decimals
    pub dev_holdings: f64,

    /// Estimated liquidity in USD, rounded to two decimals
    pub liquidity: f64,

    /// Annotations explaining the score
    pub flags: Vec<Flag>,
}

/// Aggregate statistics over one scan run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of tokens that produced a report
    pub total_scanned: u64,

    /// Tokens scoring at or above the opportunity threshold
    pub opportunities: u64,

    /// Mean of the stored (rounded) scores
    pub avg_score: f64,

    /// Sum of the stored (rounded) liquidity estimates
    pub total_liquidity: f64,
}

/// Complete output of one scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// When the scan finished
    pub timestamp: DateTime<Utc>,

    /// Aggregate statistics
    pub stats: ScanStats,

    /// Per-token reports, highest score first
    pub tokens: Vec<TokenReport>,
}

impl ScanResult {
    /// Sort reports by descending score and compute the aggregate stats.
    /// Statistics are taken over the stored rounded values, so the file is
    /// internally consistent for anyone recomputing them.
    pub fn from_reports(mut tokens: Vec<TokenReport>) -> Self {
        tokens.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let total_scanned = tokens.len() as u64;
        let opportunities = tokens
            .iter()
            .filter(|t| t.score >= OPPORTUNITY_SCORE)
            .count() as u64;
        let avg_score = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.score).sum::<f64>() / tokens.len() as f64
        };
        let total_liquidity: f64 = tokens.iter().map(|t| t.liquidity).sum();

        Self {
            timestamp: Utc::now(),
            stats: ScanStats {
                total_scanned,
                opportunities,
                avg_score: round2(avg_score),
                total_liquidity: round2(total_liquidity),
            },
            tokens,
        }
    }

    /// Result for a run that found nothing: zeroed stats, no tokens.
    pub fn empty() -> Self {
        Self {
            timestamp: Utc::now(),
            stats: ScanStats::default(),
            tokens: Vec::new(),
        }
    }

    /// Write the result as pretty-printed JSON, creating parent directories
    /// as needed.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
