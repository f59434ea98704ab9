//! Domain Layer - Core scoring logic for the token scanner
//!
//! This module contains pure types and logic with no external dependencies.
//! All network interaction happens through the ports layer.
//!
//! - `scoring`: piecewise-linear sub-scores, weighted aggregation, risk levels
//! - `flags`: human-readable annotations derived from the scoring thresholds
//! - `report`: per-token reports, scan statistics and JSON persistence

pub mod scoring;
pub mod flags;
pub mod report;

pub use scoring::{
    age_score, composite_score, dev_holdings_score, holder_score, liquidity_score, round2,
    RiskLevel,
};
pub use flags::{generate_flags, Flag, FlagKind};
pub use report::{ReportError, ScanResult, ScanStats, TokenReport};
