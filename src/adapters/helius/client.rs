//! Helius API Client
//!
//! Implements the token data port against Helius: DAS asset search and
//! enriched transaction history on the v0 REST surface, the token-metadata
//! batch endpoint, and getTokenSupply / getTokenLargestAccounts over
//! JSON-RPC. Every request goes through a shared retry loop that backs off
//! exponentially on 429 and linearly on server errors.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::ports::token_data::{
    TokenDataError, TokenDataPort, TokenHolder, TokenMetadata, TokenSupply, TransactionRecord,
};

use super::types::{DasSearchResponse, LargestAccountsResponse, SupplyResponse};

/// Configuration for the HeliusClient
#[derive(Debug, Clone)]
pub struct HeliusConfig {
    /// Base URL of the v0 REST API
    pub base_url: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// API key appended to every request
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retry attempts
    pub max_retries: u32,
    /// Base delay for backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Default for HeliusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.helius.xyz/v0".to_string(),
            rpc_url: "https://mainnet.helius-rpc.com".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

impl HeliusConfig {
    /// Create config with the given API key and defaults for everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Client for the Helius REST and RPC endpoints
#[derive(Debug, Clone)]
pub struct HeliusClient {
    config: HeliusConfig,
    http: Client,
}

impl HeliusClient {
    /// Create a new HeliusClient with the given configuration
    pub fn new(config: HeliusConfig) -> Result<Self, TokenDataError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TokenDataError::Network(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Get the configured REST base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn rest_url(&self, path: &str) -> String {
        format!(
            "{}/{}?api-key={}",
            self.config.base_url, path, self.config.api_key
        )
    }

    fn rpc_endpoint(&self) -> String {
        format!("{}/?api-key={}", self.config.rpc_url, self.config.api_key)
    }

    /// Execute a request with retry logic and backoff
    async fn execute_with_retry<F, Fut>(
        &self,
        request_fn: F,
    ) -> Result<reqwest::Response, TokenDataError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    // Rate limiting backs off exponentially
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * 2u64.pow(attempt + 1),
                        );
                        tracing::warn!(
                            "Rate limited (429), backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error =
                            Some(TokenDataError::RateLimited("too many requests".to_string()));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    // Server errors retry with linear backoff
                    if status.is_server_error() {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * (attempt as u64 + 1),
                        );
                        last_error =
                            Some(TokenDataError::Service(format!("Server error: {}", status)));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    // Other client errors are not retryable
                    if !status.is_success() {
                        return Err(TokenDataError::Service(format!("HTTP {}", status)));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(TokenDataError::Network(e.to_string()));
                    let backoff = Duration::from_millis(
                        self.config.retry_base_delay_ms * (attempt as u64 + 1),
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| TokenDataError::Service("Max retries exceeded".to_string())))
    }

    /// Make a JSON-RPC call against the RPC endpoint
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<reqwest::Response, TokenDataError> {
        let url = self.rpc_endpoint();
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        self.execute_with_retry(|| async { self.http.post(&url).json(&body).send().await })
            .await
    }

    /// Key metadata entries by their account address, skipping entries that
    /// fail to deserialize or carry no account field.
    fn key_metadata_by_account(items: Vec<serde_json::Value>) -> HashMap<String, TokenMetadata> {
        let mut map = HashMap::new();
        for item in items {
            let meta: TokenMetadata = match serde_json::from_value(item) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!("Skipping malformed metadata entry: {}", e);
                    continue;
                }
            };
            if let Some(account) = meta.account.clone() {
                map.insert(account, meta);
            }
        }
        map
    }
}

#[async_trait]
impl TokenDataPort for HeliusClient {
    async fn search_assets_by_creator(
        &self,
        creator: &str,
        page: u32,
        limit: usize,
    ) -> Result<Vec<String>, TokenDataError> {
        let url = self.rest_url("assets");
        let body = json!({
            "creatorAddress": creator,
            "limit": limit,
            "page": page,
        });

        let response = self
            .execute_with_retry(|| async { self.http.post(&url).json(&body).send().await })
            .await?;

        let parsed: DasSearchResponse = response
            .json()
            .await
            .map_err(|e| TokenDataError::Parse(format!("Failed to parse asset search: {}", e)))?;

        Ok(parsed.mint_ids())
    }

    async fn recent_program_transactions(
        &self,
        program: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, TokenDataError> {
        let url = format!(
            "{}/addresses/{}/transactions?api-key={}&limit={}",
            self.config.base_url, program, self.config.api_key, limit
        );

        let response = self
            .execute_with_retry(|| async { self.http.get(&url).send().await })
            .await?;

        response
            .json()
            .await
            .map_err(|e| TokenDataError::Parse(format!("Failed to parse transactions: {}", e)))
    }

    async fn token_metadata_batch(
        &self,
        mints: &[String],
    ) -> Result<HashMap<String, TokenMetadata>, TokenDataError> {
        if mints.is_empty() {
            return Ok(HashMap::new());
        }

        let url = self.rest_url("token-metadata");
        let body = json!({ "mintAccounts": mints });

        let response = self
            .execute_with_retry(|| async { self.http.post(&url).json(&body).send().await })
            .await?;

        let items: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| TokenDataError::Parse(format!("Failed to parse metadata batch: {}", e)))?;

        Ok(Self::key_metadata_by_account(items))
    }

    async fn token_supply(&self, mint: &str) -> Result<TokenSupply, TokenDataError> {
        let response = self.rpc_call("getTokenSupply", json!([mint])).await?;

        let parsed: SupplyResponse = response
            .json()
            .await
            .map_err(|e| TokenDataError::Parse(format!("Failed to parse supply: {}", e)))?;

        Ok(parsed.into_supply())
    }

    async fn token_largest_accounts(
        &self,
        mint: &str,
    ) -> Result<Vec<TokenHolder>, TokenDataError> {
        let response = self
            .rpc_call("getTokenLargestAccounts", json!([mint]))
            .await?;

        let parsed: LargestAccountsResponse = response.json().await.map_err(|e| {
            TokenDataError::Parse(format!("Failed to parse largest accounts: {}", e))
        })?;

        Ok(parsed.into_holders())
    }
}
