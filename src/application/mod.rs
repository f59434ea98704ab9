pub mod discovery;
pub mod enricher;
pub mod orchestrator;

pub use discovery::{extract_mints, DiscoveryPipeline};
pub use enricher::{TokenEnricher, DEFAULT_AGE_HOURS, LIQUIDITY_PER_HOLDER_USD};
pub use orchestrator::{
    ScanConfig, TokenScanner, DEFAULT_MAX_TOKENS, DEFAULT_PACING_DELAY, DEFAULT_TRANSACTION_LIMIT,
    PUMP_FUN_PROGRAM,
};
