//! Token Discovery
//!
//! Two-stage mint discovery: the DAS asset search is the primary source and
//! the program transaction history is the fallback, consulted only when the
//! search yields nothing. Candidates are deduplicated in first-seen order
//! and truncated to the configured maximum.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ports::token_data::{TokenDataPort, TransactionRecord};

/// Two-stage mint discovery over a token data source
pub struct DiscoveryPipeline<S: TokenDataPort> {
    source: Arc<S>,
    program_address: String,
    max_tokens: usize,
    transaction_limit: usize,
}

impl<S: TokenDataPort> DiscoveryPipeline<S> {
    pub fn new(
        source: Arc<S>,
        program_address: impl Into<String>,
        max_tokens: usize,
        transaction_limit: usize,
    ) -> Self {
        Self {
            source,
            program_address: program_address.into(),
            max_tokens,
            transaction_limit,
        }
    }

    /// Resolve the candidate mint list. Failures in either stage are
    /// absorbed: a failed primary counts as empty and triggers the
    /// fallback, a failed fallback yields an empty list.
    pub async fn resolve(&self) -> Vec<String> {
        tracing::info!("Searching for assets created by {}", self.program_address);

        let primary = match self
            .source
            .search_assets_by_creator(&self.program_address, 1, self.max_tokens)
            .await
        {
            Ok(mints) => mints,
            Err(e) => {
                tracing::warn!("Asset search failed: {}", e);
                Vec::new()
            }
        };

        if !primary.is_empty() {
            tracing::info!("Found {} assets via search", primary.len());
            return truncate_unique(primary, self.max_tokens);
        }

        tracing::info!("Asset search returned nothing, falling back to transaction parsing");

        let transactions = match self
            .source
            .recent_program_transactions(&self.program_address, self.transaction_limit)
            .await
        {
            Ok(transactions) => transactions,
            Err(e) => {
                tracing::warn!("Transaction fetch failed: {}", e);
                Vec::new()
            }
        };

        let mints = extract_mints(&transactions);
        tracing::info!(
            "Found {} unique mints in {} transactions",
            mints.len(),
            transactions.len()
        );
        truncate_unique(mints, self.max_tokens)
    }
}

/// Collect every mint referenced by the transactions' token transfers,
/// native transfers and account data, in first-seen order.
pub fn extract_mints(transactions: &[TransactionRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut mints = Vec::new();

    for tx in transactions {
        let records = tx
            .token_transfers
            .iter()
            .chain(&tx.native_transfers)
            .chain(&tx.account_data);
        for record in records {
            if let Some(mint) = &record.mint {
                if seen.insert(mint.clone()) {
                    mints.push(mint.clone());
                }
            }
        }
    }

    mints
}

fn truncate_unique(mints: Vec<String>, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = mints
        .into_iter()
        .filter(|mint| seen.insert(mint.clone()))
        .collect();
    unique.truncate(max);
    unique
}
