//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, the token data trait abstracts every
//! network lookup the scan pipeline makes (asset search, transaction
//! history, metadata, supply and holder queries).

pub mod token_data;
pub mod mocks;

pub use token_data::{
    MetadataAccount, MetadataFields, MintRef, OnChainMetadata, TokenDataError, TokenDataPort,
    TokenHolder, TokenMetadata, TokenSupply, TransactionRecord, DEFAULT_DECIMALS,
};
pub use mocks::MockTokenData;
