//! Token data port: the trait the scan pipeline depends on, plus the wire
//! types shared between the Helius adapter and the application layer.
//!
//! Wire types mirror the provider's JSON loosely: every field is defaulted
//! so partial or malformed payloads deserialize to something usable instead
//! of failing the whole batch.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimals assumed when the supply lookup fails or omits them
pub const DEFAULT_DECIMALS: u8 = 9;

/// Token data error type
#[derive(Error, Debug, Clone)]
pub enum TokenDataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),
}

/// Metadata entry for one mint, as returned by the batch metadata endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Mint address this entry belongs to
    #[serde(default)]
    pub account: Option<String>,

    /// On-chain metadata account contents
    #[serde(default, rename = "onChainMetadata")]
    pub on_chain_metadata: Option<OnChainMetadata>,
}

/// On-chain portion of a metadata entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnChainMetadata {
    /// Parsed metadata account
    #[serde(default)]
    pub metadata: Option<MetadataAccount>,

    /// Last update timestamp, seconds since epoch. The provider sends this
    /// as either a number or a string, so it is kept raw until needed.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<serde_json::Value>,
}

/// Parsed metadata account wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataAccount {
    /// Name and symbol fields
    #[serde(default)]
    pub data: Option<MetadataFields>,
}

/// Display fields from the metadata account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataFields {
    /// Token name, may be padded with whitespace on chain
    #[serde(default)]
    pub name: Option<String>,

    /// Token symbol, may be padded with whitespace on chain
    #[serde(default)]
    pub symbol: Option<String>,
}

/// One enriched transaction from the address history endpoint. Only the
/// sections that can carry mint addresses are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// SPL token movements
    #[serde(default, rename = "tokenTransfers")]
    pub token_transfers: Vec<MintRef>,

    /// Native SOL movements
    #[serde(default, rename = "nativeTransfers")]
    pub native_transfers: Vec<MintRef>,

    /// Per-account balance changes
    #[serde(default, rename = "accountData")]
    pub account_data: Vec<MintRef>,
}

/// Any transaction sub-record that may name a mint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintRef {
    /// Mint address if this record references one
    #[serde(default)]
    pub mint: Option<String>,
}

/// Total supply of a mint in raw base units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSupply {
    /// Raw amount in base units
    pub amount: u64,

    /// Decimal places of the mint
    pub decimals: u8,
}

impl Default for TokenSupply {
    fn default() -> Self {
        Self {
            amount: 0,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

/// One entry from the largest-accounts lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHolder {
    /// Token account address
    pub address: String,

    /// Raw balance in base units
    pub amount: u64,
}

/// Token data port trait
#[async_trait]
pub trait TokenDataPort: Send + Sync {
    /// Search for assets created by the given address. Returns mint
    /// addresses for the requested page.
    async fn search_assets_by_creator(
        &self,
        creator: &str,
        page: u32,
        limit: usize,
    ) -> Result<Vec<String>, TokenDataError>;

    /// Fetch recent enriched transactions involving the given program
    async fn recent_program_transactions(
        &self,
        program: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, TokenDataError>;

    /// Fetch metadata for a batch of mints, keyed by mint address
    async fn token_metadata_batch(
        &self,
        mints: &[String],
    ) -> Result<HashMap<String, TokenMetadata>, TokenDataError>;

    /// Fetch the total supply of a mint
    async fn token_supply(&self, mint: &str) -> Result<TokenSupply, TokenDataError>;

    /// Fetch the largest token accounts of a mint, biggest first
    async fn token_largest_accounts(&self, mint: &str)
        -> Result<Vec<TokenHolder>, TokenDataError>;
}
