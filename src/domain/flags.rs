//! Flag Generation
//!
//! Human-readable annotations derived from the same thresholds the scoring
//! curves use. Flags are emitted in a fixed order (holders, age, dev
//! holdings, liquidity) so report output is deterministic; the dev holdings
//! dimension always contributes exactly one flag.

use serde::{Deserialize, Serialize};

use super::scoring::{
    DEV_RED_FLAG_PCT, DEV_WARNING_PCT, EXCELLENT_HOLDERS, GOOD_HOLDERS, GREAT_LIQUIDITY_USD,
    MIN_HOLDERS, MIN_LIQUIDITY_USD, SWEET_SPOT_AGE_MAX_HOURS, SWEET_SPOT_AGE_MIN_HOURS,
};

/// Age below which a token gets flagged as very new (hours)
pub const VERY_NEW_AGE_HOURS: f64 = 12.0;

/// Age past which a token gets flagged as older (hours)
pub const MATURE_AGE_HOURS: f64 = 168.0;

/// Sentiment category of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKind {
    Opportunity,
    LowRisk,
    MediumRisk,
    HighRisk,
}

/// A single annotation attached to a token report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Sentiment category, serialized under the `type` key
    #[serde(rename = "type")]
    pub kind: FlagKind,

    /// Display text including the interpolated metric value
    pub text: String,
}

impl Flag {
    fn new(kind: FlagKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Generate the flag list for one token's raw metrics.
pub fn generate_flags(
    holder_count: u64,
    age_hours: f64,
    dev_holdings_pct: f64,
    liquidity_usd: f64,
) -> Vec<Flag> {
    let mut flags = Vec::new();

    if holder_count as f64 >= EXCELLENT_HOLDERS {
        flags.push(Flag::new(
            FlagKind::Opportunity,
            format!("Excellent holder base ({} holders)", holder_count),
        ));
    } else if holder_count as f64 >= GOOD_HOLDERS {
        flags.push(Flag::new(
            FlagKind::Opportunity,
            format!("Strong holder base ({} holders)", holder_count),
        ));
    } else if (holder_count as f64) < MIN_HOLDERS {
        flags.push(Flag::new(
            FlagKind::HighRisk,
            format!("Low holder count ({} holders)", holder_count),
        ));
    }

    if (SWEET_SPOT_AGE_MIN_HOURS..=SWEET_SPOT_AGE_MAX_HOURS).contains(&age_hours) {
        flags.push(Flag::new(
            FlagKind::Opportunity,
            format!("In sweet spot age range ({:.1}h)", age_hours),
        ));
    } else if age_hours < VERY_NEW_AGE_HOURS {
        flags.push(Flag::new(
            FlagKind::MediumRisk,
            format!("Very new token ({:.1}h)", age_hours),
        ));
    } else if age_hours > MATURE_AGE_HOURS {
        flags.push(Flag::new(
            FlagKind::MediumRisk,
            format!("Older token ({:.1}h)", age_hours),
        ));
    }

    if dev_holdings_pct >= DEV_RED_FLAG_PCT {
        flags.push(Flag::new(
            FlagKind::HighRisk,
            format!("High dev holdings ({:.1}%)", dev_holdings_pct),
        ));
    } else if dev_holdings_pct >= DEV_WARNING_PCT {
        flags.push(Flag::new(
            FlagKind::MediumRisk,
            format!("Moderate dev holdings ({:.1}%)", dev_holdings_pct),
        ));
    } else {
        flags.push(Flag::new(
            FlagKind::LowRisk,
            format!("Low dev holdings ({:.1}%)", dev_holdings_pct),
        ));
    }

    if liquidity_usd >= GREAT_LIQUIDITY_USD {
        flags.push(Flag::new(
            FlagKind::Opportunity,
            format!("Great liquidity (${})", format_usd(liquidity_usd)),
        ));
    } else if liquidity_usd < MIN_LIQUIDITY_USD {
        flags.push(Flag::new(
            FlagKind::HighRisk,
            format!("Low liquidity (${})", format_usd(liquidity_usd)),
        ));
    }

    flags
}

/// Format a USD amount with thousands separators and no decimals
fn format_usd(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
