//! Pumpscan - Pump.fun Token Scanner Library
//!
//! Discovers recently launched pump.fun tokens via the Helius API and scores
//! them by holder base, age, dev holdings and estimated liquidity.
//!
//! # Modules
//!
//! - `domain`: Core scoring logic (sub-scores, risk levels, flags, reports)
//! - `ports`: Trait abstractions (TokenDataPort) and test mocks
//! - `adapters`: External implementations (Helius client, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Discovery, enrichment and the scan orchestrator

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
