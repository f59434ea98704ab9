//! Mock token data port for tests. Records every call and serves
//! pre-configured responses; individual methods can be toggled to fail.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::token_data::{
    TokenDataError, TokenDataPort, TokenHolder, TokenMetadata, TokenSupply, TransactionRecord,
};

/// Mock token data port that records calls and allows controlled responses
#[derive(Debug, Default)]
pub struct MockTokenData {
    calls: Arc<Mutex<Vec<String>>>,
    assets: Arc<Mutex<Vec<String>>>,
    transactions: Arc<Mutex<Vec<TransactionRecord>>>,
    metadata: Arc<Mutex<HashMap<String, TokenMetadata>>>,
    supplies: Arc<Mutex<HashMap<String, TokenSupply>>>,
    holders: Arc<Mutex<HashMap<String, Vec<TokenHolder>>>>,
    failures: Arc<Mutex<HashSet<String>>>,
}

impl MockTokenData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the mints returned by the asset search
    pub fn with_assets(self, mints: &[&str]) -> Self {
        *self.assets.lock().unwrap() = mints.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Builder method to set the transactions returned by the history lookup
    pub fn with_transactions(self, transactions: Vec<TransactionRecord>) -> Self {
        *self.transactions.lock().unwrap() = transactions;
        self
    }

    /// Builder method to add a metadata entry for a mint
    pub fn with_metadata(self, mint: &str, metadata: TokenMetadata) -> Self {
        self.metadata
            .lock()
            .unwrap()
            .insert(mint.to_string(), metadata);
        self
    }

    /// Builder method to set the supply returned for a mint
    pub fn with_supply(self, mint: &str, supply: TokenSupply) -> Self {
        self.supplies
            .lock()
            .unwrap()
            .insert(mint.to_string(), supply);
        self
    }

    /// Builder method to set the largest accounts returned for a mint
    pub fn with_holders(self, mint: &str, holders: Vec<TokenHolder>) -> Self {
        self.holders
            .lock()
            .unwrap()
            .insert(mint.to_string(), holders);
        self
    }

    /// Builder method to make one port method return an error
    pub fn with_failure(self, method: &str) -> Self {
        self.failures.lock().unwrap().insert(method.to_string());
        self
    }

    /// Get all recorded calls in order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times the given method was called
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == method)
            .count()
    }

    fn record(&self, method: &str) -> Result<(), TokenDataError> {
        self.calls.lock().unwrap().push(method.to_string());
        if self.failures.lock().unwrap().contains(method) {
            return Err(TokenDataError::Service(format!("{} unavailable", method)));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenDataPort for MockTokenData {
    async fn search_assets_by_creator(
        &self,
        _creator: &str,
        _page: u32,
        limit: usize,
    ) -> Result<Vec<String>, TokenDataError> {
        self.record("search_assets_by_creator")?;
        let assets = self.assets.lock().unwrap();
        Ok(assets.iter().take(limit).cloned().collect())
    }

    async fn recent_program_transactions(
        &self,
        _program: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, TokenDataError> {
        self.record("recent_program_transactions")?;
        let transactions = self.transactions.lock().unwrap();
        Ok(transactions.iter().take(limit).cloned().collect())
    }

    async fn token_metadata_batch(
        &self,
        mints: &[String],
    ) -> Result<HashMap<String, TokenMetadata>, TokenDataError> {
        self.record("token_metadata_batch")?;
        let metadata = self.metadata.lock().unwrap();
        Ok(mints
            .iter()
            .filter_map(|m| metadata.get(m).map(|meta| (m.clone(), meta.clone())))
            .collect())
    }

    async fn token_supply(&self, mint: &str) -> Result<TokenSupply, TokenDataError> {
        self.record("token_supply")?;
        let supplies = self.supplies.lock().unwrap();
        Ok(supplies.get(mint).cloned().unwrap_or_default())
    }

    async fn token_largest_accounts(
        &self,
        mint: &str,
    ) -> Result<Vec<TokenHolder>, TokenDataError> {
        self.record("token_largest_accounts")?;
        let holders = self.holders.lock().unwrap();
        Ok(holders.get(mint).cloned().unwrap_or_default())
    }
}
