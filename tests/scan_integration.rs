//! Token Scanner Integration Tests
//!
//! Integration tests that verify the scan pipeline components work together:
//! 1. Discovery flow: asset search with transaction-parsing fallback
//! 2. Scoring flow: enrichment, scoring and ranking of discovered tokens
//! 3. Resilience: provider failures degrade results instead of aborting
//! 4. Report output: JSON artifact round-trip
//!
//! All tests are deterministic (no real network calls) and use mock data.

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use chrono::Utc;

use pumpscan::application::{ScanConfig, TokenScanner, DEFAULT_AGE_HOURS};
use pumpscan::domain::{FlagKind, RiskLevel};
use pumpscan::ports::mocks::MockTokenData;
use pumpscan::ports::token_data::{
    MetadataAccount, MetadataFields, MintRef, OnChainMetadata, TokenHolder, TokenMetadata,
    TokenSupply, TransactionRecord,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Create a metadata entry with the given display fields
fn create_metadata(
    name: &str,
    symbol: &str,
    updated_at: Option<serde_json::Value>,
) -> TokenMetadata {
    TokenMetadata {
        account: None,
        on_chain_metadata: Some(OnChainMetadata {
            metadata: Some(MetadataAccount {
                data: Some(MetadataFields {
                    name: Some(name.to_string()),
                    symbol: Some(symbol.to_string()),
                }),
            }),
            updated_at,
        }),
    }
}

/// Timestamp the given number of hours in the past, as the provider sends it
fn hours_ago(hours: f64) -> serde_json::Value {
    serde_json::json!(Utc::now().timestamp() as f64 - hours * 3600.0)
}

/// Largest-accounts fixture: one top holder followed by smaller ones
fn create_holder_set(count: usize, top_amount: u64, rest_amount: u64) -> Vec<TokenHolder> {
    (0..count)
        .map(|i| TokenHolder {
            address: format!("holder{}", i),
            amount: if i == 0 { top_amount } else { rest_amount },
        })
        .collect()
}

/// Transaction fixture with mints spread across the three sections
fn create_transaction(token: &[&str], native: &[&str], account: &[&str]) -> TransactionRecord {
    let refs = |mints: &[&str]| -> Vec<MintRef> {
        mints
            .iter()
            .map(|m| MintRef {
                mint: Some(m.to_string()),
            })
            .collect()
    };
    TransactionRecord {
        token_transfers: refs(token),
        native_transfers: refs(native),
        account_data: refs(account),
    }
}

/// Wire up a mint that scores as a strong opportunity: 1200 holders, 48
/// hours old, dev holding 1% of supply
fn wire_strong_token(mock: MockTokenData, mint: &str) -> MockTokenData {
    mock.with_metadata(
        mint,
        create_metadata("Moon Dog", "MOON", Some(hours_ago(48.0))),
    )
    .with_supply(
        mint,
        TokenSupply {
            amount: 10_000_000_000,
            decimals: 9,
        },
    )
    .with_holders(mint, create_holder_set(1200, 100_000_000, 1_000_000))
}

/// Scan config with pacing disabled so tests run instantly
fn fast_config() -> ScanConfig {
    ScanConfig {
        pacing_delay: Duration::ZERO,
        ..Default::default()
    }
}

// ============================================================================
// Test Module: Discovery Flow
// ============================================================================

mod discovery_flow {
    use super::*;

    /// Test: A successful asset search never touches the transaction fallback
    #[tokio::test]
    async fn test_primary_search_skips_fallback() {
        let source = Arc::new(wire_strong_token(
            MockTokenData::new().with_assets(&["strongmint"]),
            "strongmint",
        ));
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.stats.total_scanned, 1);
        assert_eq!(source.call_count("search_assets_by_creator"), 1);
        assert_eq!(source.call_count("recent_program_transactions"), 0);
    }

    /// Test: An empty asset search falls back to parsing recent
    /// transactions, deduplicating mints in first-seen order
    #[tokio::test]
    async fn test_empty_search_uses_transaction_fallback() {
        let source = Arc::new(
            MockTokenData::new()
                .with_transactions(vec![
                    create_transaction(&["dup", "m1"], &["dup"], &[]),
                    create_transaction(&[], &[], &["m2"]),
                ])
                .with_metadata("dup", create_metadata("Dup", "DUP", None))
                .with_metadata("m1", create_metadata("One", "ONE", None))
                .with_metadata("m2", create_metadata("Two", "TWO", None)),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        // Equal scores keep discovery order, so the ranking shows the dedup
        let order: Vec<_> = result.tokens.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(order, vec!["dup", "m1", "m2"]);

        let calls = source.get_calls();
        assert_eq!(calls[0], "search_assets_by_creator");
        assert_eq!(calls[1], "recent_program_transactions");
        assert_eq!(calls[2], "token_metadata_batch");
    }

    /// Test: Fallback discovery truncates to the configured maximum
    #[tokio::test]
    async fn test_fallback_truncates_to_max_tokens() {
        let config = ScanConfig {
            max_tokens: 2,
            ..fast_config()
        };
        let source = Arc::new(
            MockTokenData::new()
                .with_transactions(vec![
                    create_transaction(&["m1", "m2"], &[], &[]),
                    create_transaction(&["m3", "m4"], &[], &[]),
                ])
                .with_metadata("m1", create_metadata("One", "ONE", None))
                .with_metadata("m2", create_metadata("Two", "TWO", None))
                .with_metadata("m3", create_metadata("Three", "THR", None))
                .with_metadata("m4", create_metadata("Four", "FOUR", None)),
        );
        let scanner = TokenScanner::new(config, Arc::clone(&source));

        let result = scanner.run_scan().await;
        let order: Vec<_> = result.tokens.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(order, vec!["m1", "m2"]);
    }

    /// Test: Mints without a metadata entry are skipped without extra lookups
    #[tokio::test]
    async fn test_missing_metadata_entry_skips_token() {
        let source = Arc::new(
            MockTokenData::new()
                .with_assets(&["m1", "m2", "m3"])
                .with_metadata("m1", create_metadata("One", "ONE", None))
                .with_metadata("m3", create_metadata("Three", "THR", None)),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.stats.total_scanned, 2);
        // The skipped mint never reaches the per-token lookups
        assert_eq!(source.call_count("token_supply"), 2);
        assert_eq!(source.call_count("token_largest_accounts"), 2);
    }
}

// ============================================================================
// Test Module: Scoring Flow
// ============================================================================

mod scoring_flow {
    use super::*;

    /// Test: A token with a strong holder base in the sweet-spot age range
    /// scores as a low-risk opportunity
    #[tokio::test]
    async fn test_strong_token_scores_as_opportunity() {
        let source = Arc::new(wire_strong_token(
            MockTokenData::new().with_assets(&["strongmint"]),
            "strongmint",
        ));
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.tokens.len(), 1);

        let token = &result.tokens[0];
        assert_eq!(token.address, "strongmint");
        assert_eq!(token.name, "Moon Dog");
        assert_eq!(token.symbol, "MOON");
        assert_eq!(token.holders, 1200);
        assert_relative_eq!(token.dev_holdings, 1.0);
        assert!((token.age_hours - 48.0).abs() < 0.1);
        assert_relative_eq!(token.liquidity, 180_000.0);

        // 100*0.35 + 100*0.25 + (100 - 1/30*50)*0.25 + 100*0.15, rounded
        assert_relative_eq!(token.score, 99.58);
        assert_eq!(token.risk_level, RiskLevel::Low);
        assert_eq!(result.stats.opportunities, 1);

        let texts: Vec<_> = token.flags.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Excellent holder base (1200 holders)",
                "In sweet spot age range (48.0h)",
                "Low dev holdings (1.0%)",
                "Great liquidity ($180,000)",
            ]
        );
        assert_eq!(token.flags[2].kind, FlagKind::LowRisk);
    }

    /// Test: A holder base in the 500..1000 band still flags as an
    /// opportunity, one tier below the excellent flag
    #[tokio::test]
    async fn test_strong_holder_band_flags_opportunity() {
        let source = Arc::new(
            MockTokenData::new()
                .with_assets(&["midmint"])
                .with_metadata(
                    "midmint",
                    create_metadata("Mid Cat", "MCAT", Some(hours_ago(48.0))),
                )
                .with_supply(
                    "midmint",
                    TokenSupply {
                        amount: 10_000_000_000,
                        decimals: 9,
                    },
                )
                .with_holders("midmint", create_holder_set(600, 100_000_000, 1_000_000)),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.tokens.len(), 1);

        let token = &result.tokens[0];
        assert_eq!(token.holders, 600);
        // 76*0.35 + 100*0.25 + (100 - 1/30*50)*0.25 + 100*0.15, rounded
        assert_relative_eq!(token.score, 91.18);

        let texts: Vec<_> = token.flags.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Strong holder base (600 holders)",
                "In sweet spot age range (48.0h)",
                "Low dev holdings (1.0%)",
                "Great liquidity ($90,000)",
            ]
        );
        assert_eq!(token.flags[0].kind, FlagKind::Opportunity);
    }

    /// Test: A token that resolves metadata but no supply or holder data
    /// degrades to defaults and lands at medium risk
    #[tokio::test]
    async fn test_sparse_token_degrades_to_defaults() {
        let source = Arc::new(
            MockTokenData::new()
                .with_assets(&["sparsemint"])
                .with_metadata("sparsemint", create_metadata("Ghost Coin", "GHST", None)),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.tokens.len(), 1);

        let token = &result.tokens[0];
        assert_eq!(token.holders, 0);
        assert_relative_eq!(token.age_hours, DEFAULT_AGE_HOURS);
        assert_relative_eq!(token.dev_holdings, 0.0);
        assert_relative_eq!(token.liquidity, 0.0);
        // Only the age and dev sub-scores contribute
        assert_relative_eq!(token.score, 50.0);
        assert_eq!(token.risk_level, RiskLevel::Medium);
        assert_eq!(result.stats.opportunities, 0);

        let texts: Vec<_> = token.flags.iter().map(|f| f.text.as_str()).collect();
        assert!(texts.contains(&"Low holder count (0 holders)"));
        assert!(texts.contains(&"Low liquidity ($0)"));
    }

    /// Test: Reports come back sorted by descending score with stats taken
    /// over the stored values
    #[tokio::test]
    async fn test_scan_sorts_and_aggregates() {
        let source = Arc::new(wire_strong_token(
            MockTokenData::new()
                .with_assets(&["weakmint", "strongmint"])
                .with_metadata("weakmint", create_metadata("Weak", "WEAK", None)),
            "strongmint",
        ));
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        let order: Vec<_> = result.tokens.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(order, vec!["strongmint", "weakmint"]);

        assert_eq!(result.stats.total_scanned, 2);
        assert_eq!(result.stats.opportunities, 1);
        assert_relative_eq!(result.stats.avg_score, 74.79);
        assert_relative_eq!(result.stats.total_liquidity, 180_000.0);
    }
}

// ============================================================================
// Test Module: Resilience
// ============================================================================

mod resilience {
    use super::*;

    /// Test: A failing asset search still recovers through the fallback
    #[tokio::test]
    async fn test_search_failure_recovers_via_fallback() {
        let source = Arc::new(
            MockTokenData::new()
                .with_failure("search_assets_by_creator")
                .with_transactions(vec![create_transaction(&["m1"], &[], &[])])
                .with_metadata("m1", create_metadata("One", "ONE", None)),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.stats.total_scanned, 1);
        assert_eq!(result.tokens[0].address, "m1");
    }

    /// Test: Both discovery stages failing produces an empty result
    #[tokio::test]
    async fn test_total_discovery_failure_is_absorbed() {
        let source = Arc::new(
            MockTokenData::new()
                .with_failure("search_assets_by_creator")
                .with_failure("recent_program_transactions"),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.stats.total_scanned, 0);
        assert!(result.tokens.is_empty());
        assert_eq!(source.call_count("token_metadata_batch"), 0);
    }

    /// Test: Supply and holder failures degrade the report instead of
    /// dropping the token
    #[tokio::test]
    async fn test_lookup_failures_degrade_report() {
        let source = Arc::new(
            MockTokenData::new()
                .with_assets(&["m1"])
                .with_metadata("m1", create_metadata("One", "ONE", None))
                .with_failure("token_supply")
                .with_failure("token_largest_accounts"),
        );
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        assert_eq!(result.tokens.len(), 1);

        let token = &result.tokens[0];
        assert_eq!(token.holders, 0);
        assert_relative_eq!(token.dev_holdings, 0.0);
        assert_relative_eq!(token.liquidity, 0.0);
        assert_relative_eq!(token.score, 50.0);

        let texts: Vec<_> = token.flags.iter().map(|f| f.text.as_str()).collect();
        assert!(texts.contains(&"Low holder count (0 holders)"));
    }
}

// ============================================================================
// Test Module: Report Output
// ============================================================================

mod report_output {
    use super::*;

    /// Test: A full scan round-trips through the JSON artifact on disk
    #[tokio::test]
    async fn test_scan_result_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("tokens.json");

        let source = Arc::new(wire_strong_token(
            MockTokenData::new().with_assets(&["strongmint"]),
            "strongmint",
        ));
        let scanner = TokenScanner::new(fast_config(), Arc::clone(&source));

        let result = scanner.run_scan().await;
        result.write_json(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["stats"]["total_scanned"], 1);
        assert_eq!(json["tokens"][0]["address"], "strongmint");
        assert_eq!(json["tokens"][0]["risk_level"], "low");
        assert_eq!(json["tokens"][0]["flags"][0]["type"], "opportunity");
    }
}
