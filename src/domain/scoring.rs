//! Token Scoring
//!
//! Four piecewise-linear curves mapping raw token metrics to 0-100 sub-scores,
//! plus the weighted aggregation and risk classification built on top of them.
//! All functions are pure; thresholds are exported so the flag generator and
//! tests share a single set of constants.

use serde::{Deserialize, Serialize};

/// Holder count that earns a full holder score
pub const EXCELLENT_HOLDERS: f64 = 1000.0;

/// Holder count where the upper interpolation bracket starts
pub const GOOD_HOLDERS: f64 = 500.0;

/// Holder count below which a token is considered thinly held
pub const MIN_HOLDERS: f64 = 100.0;

/// Lower bound of the sweet-spot age window (hours)
pub const SWEET_SPOT_AGE_MIN_HOURS: f64 = 24.0;

/// Upper bound of the sweet-spot age window (hours)
pub const SWEET_SPOT_AGE_MAX_HOURS: f64 = 72.0;

/// Dev holdings percentage that zeroes the dev score
pub const DEV_RED_FLAG_PCT: f64 = 50.0;

/// Dev holdings percentage where the warning bracket starts
pub const DEV_WARNING_PCT: f64 = 30.0;

/// Liquidity (USD) that earns a full liquidity score
pub const GREAT_LIQUIDITY_USD: f64 = 50_000.0;

/// Liquidity (USD) where the upper interpolation bracket starts
pub const GOOD_LIQUIDITY_USD: f64 = 10_000.0;

/// Liquidity (USD) below which a token is considered illiquid
pub const MIN_LIQUIDITY_USD: f64 = 1_000.0;

/// Aggregation weight for the holder score
pub const HOLDER_WEIGHT: f64 = 0.35;

/// Aggregation weight for the age score
pub const AGE_WEIGHT: f64 = 0.25;

/// Aggregation weight for the dev holdings score
pub const DEV_HOLDINGS_WEIGHT: f64 = 0.25;

/// Aggregation weight for the liquidity score
pub const LIQUIDITY_WEIGHT: f64 = 0.15;

/// Composite score at or above which a token counts as an opportunity
pub const OPPORTUNITY_SCORE: f64 = 70.0;

/// Composite score at or above which risk is classified as low
pub const LOW_RISK_SCORE: f64 = 75.0;

/// Composite score at or above which risk is classified as medium
pub const MEDIUM_RISK_SCORE: f64 = 50.0;

/// Score holder count: 100 at 1000+ holders, interpolated brackets below,
/// linear ramp from zero under 100 holders.
pub fn holder_score(count: f64) -> f64 {
    let score = if count >= EXCELLENT_HOLDERS {
        100.0
    } else if count >= GOOD_HOLDERS {
        70.0 + (count - GOOD_HOLDERS) / (EXCELLENT_HOLDERS - GOOD_HOLDERS) * 30.0
    } else if count >= MIN_HOLDERS {
        40.0 + (count - MIN_HOLDERS) / (GOOD_HOLDERS - MIN_HOLDERS) * 30.0
    } else {
        count / MIN_HOLDERS * 40.0
    };
    score.clamp(0.0, 100.0)
}

/// Score token age: full marks inside the 24-72h sweet spot, linear ramp-up
/// before it, 20 points lost per 24h past it (floored at zero).
pub fn age_score(hours: f64) -> f64 {
    let score = if (SWEET_SPOT_AGE_MIN_HOURS..=SWEET_SPOT_AGE_MAX_HOURS).contains(&hours) {
        100.0
    } else if hours < SWEET_SPOT_AGE_MIN_HOURS {
        hours / SWEET_SPOT_AGE_MIN_HOURS * 100.0
    } else {
        let excess = hours - SWEET_SPOT_AGE_MAX_HOURS;
        100.0 - excess / 24.0 * 20.0
    };
    score.clamp(0.0, 100.0)
}

/// Score dev holdings percentage, lower is better: zero at 50%+, steep
/// penalty bracket from 30%, gentle slope below that.
pub fn dev_holdings_score(pct: f64) -> f64 {
    let score = if pct >= DEV_RED_FLAG_PCT {
        0.0
    } else if pct >= DEV_WARNING_PCT {
        50.0 - (pct - DEV_WARNING_PCT) / (DEV_RED_FLAG_PCT - DEV_WARNING_PCT) * 50.0
    } else {
        100.0 - pct / DEV_WARNING_PCT * 50.0
    };
    score.clamp(0.0, 100.0)
}

/// Score estimated liquidity in USD: 100 at $50k+, interpolated brackets
/// below, linear ramp from zero under $1k.
pub fn liquidity_score(usd: f64) -> f64 {
    let score = if usd >= GREAT_LIQUIDITY_USD {
        100.0
    } else if usd >= GOOD_LIQUIDITY_USD {
        70.0 + (usd - GOOD_LIQUIDITY_USD) / (GREAT_LIQUIDITY_USD - GOOD_LIQUIDITY_USD) * 30.0
    } else if usd >= MIN_LIQUIDITY_USD {
        40.0 + (usd - MIN_LIQUIDITY_USD) / (GOOD_LIQUIDITY_USD - MIN_LIQUIDITY_USD) * 30.0
    } else {
        usd / MIN_LIQUIDITY_USD * 40.0
    };
    score.clamp(0.0, 100.0)
}

/// Weighted aggregate of the four sub-scores. The weights are a convex
/// combination (they sum to exactly 1.0), so sub-scores in [0, 100] always
/// produce an aggregate in [0, 100].
pub fn composite_score(holders: f64, age: f64, dev_holdings: f64, liquidity: f64) -> f64 {
    holders * HOLDER_WEIGHT
        + age * AGE_WEIGHT
        + dev_holdings * DEV_HOLDINGS_WEIGHT
        + liquidity * LIQUIDITY_WEIGHT
}

/// Risk classification derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a composite score: >= 75 low, >= 50 medium, below that high.
    pub fn from_score(score: f64) -> Self {
        if score >= LOW_RISK_SCORE {
            RiskLevel::Low
        } else if score >= MEDIUM_RISK_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Lowercase label matching the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Round to two decimal places for stored metrics
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
