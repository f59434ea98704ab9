//! Helius Response Types
//!
//! Response envelopes for the DAS search endpoint and the JSON-RPC token
//! queries. RPC amounts arrive as strings and are coerced to integers when
//! converting into the port types; anything unparseable counts as zero.

use serde::Deserialize;

use crate::ports::token_data::{TokenHolder, TokenSupply, DEFAULT_DECIMALS};

/// DAS asset search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasSearchResponse {
    #[serde(default)]
    pub items: Vec<DasAsset>,
}

/// One asset entry from the DAS search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasAsset {
    /// Mint address of the asset
    #[serde(default)]
    pub id: Option<String>,
}

impl DasSearchResponse {
    /// Collect the mint addresses of all items that carry one
    pub fn mint_ids(self) -> Vec<String> {
        self.items.into_iter().filter_map(|item| item.id).collect()
    }
}

/// JSON-RPC response for getTokenSupply
#[derive(Debug, Clone, Deserialize)]
pub struct SupplyResponse {
    pub result: Option<SupplyResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplyResult {
    pub value: Option<SupplyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplyValue {
    /// Raw supply in base units, sent as a decimal string
    #[serde(default)]
    pub amount: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl SupplyResponse {
    /// Convert into the port supply type, defaulting on any missing piece
    pub fn into_supply(self) -> TokenSupply {
        let value = match self.result.and_then(|r| r.value) {
            Some(value) => value,
            None => return TokenSupply::default(),
        };
        TokenSupply {
            amount: value.amount.parse().unwrap_or(0),
            decimals: value.decimals,
        }
    }
}

/// JSON-RPC response for getTokenLargestAccounts
#[derive(Debug, Clone, Deserialize)]
pub struct LargestAccountsResponse {
    pub result: Option<LargestAccountsResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LargestAccountsResult {
    #[serde(default)]
    pub value: Vec<RpcTokenAccount>,
}

/// One token account entry, largest first
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcTokenAccount {
    #[serde(default)]
    pub address: String,

    /// Raw balance in base units, sent as a decimal string
    #[serde(default)]
    pub amount: String,
}

impl LargestAccountsResponse {
    /// Convert into the port holder list, preserving order
    pub fn into_holders(self) -> Vec<TokenHolder> {
        self.result
            .map(|r| r.value)
            .unwrap_or_default()
            .into_iter()
            .map(|account| TokenHolder {
                address: account.address,
                amount: account.amount.parse().unwrap_or(0),
            })
            .collect()
    }
}
