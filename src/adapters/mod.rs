//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Helius: DAS search, transaction history, token metadata and RPC queries
//! - CLI: Command-line interface for the scanner binary

pub mod helius;
pub mod cli;

pub use helius::{HeliusClient, HeliusConfig};
pub use cli::CliApp;
