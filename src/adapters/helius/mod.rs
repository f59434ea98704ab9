//! Helius Adapter
//!
//! Implements the token data port against the Helius API:
//! - DAS asset search for freshly created mints
//! - Enriched transaction history for the fallback discovery path
//! - Batch token metadata lookups
//! - Token supply and largest accounts over JSON-RPC
//!
//! # Example
//!
//! ```rust,ignore
//! use pumpscan::adapters::helius::{HeliusClient, HeliusConfig};
//! use pumpscan::ports::TokenDataPort;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HeliusClient::new(HeliusConfig::with_api_key("your-key"))?;
//!
//!     let supply = client
//!         .token_supply("So11111111111111111111111111111111111111112")
//!         .await?;
//!     println!("Supply: {} ({} decimals)", supply.amount, supply.decimals);
//!     Ok(())
//! }
//! ```

mod client;
mod types;

pub use client::{HeliusClient, HeliusConfig};
