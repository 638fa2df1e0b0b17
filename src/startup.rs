use tracing_subscriber::EnvFilter;

use crate::{
    config::Config, data::ledger::LedgerStore, error::AppError, service::ledger::LedgerService,
};

/// Installs the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Loads the entry ledger from the configured file.
///
/// A missing file yields an empty ledger. The returned service is the single ledger
/// instance for the lifetime of the process.
///
/// # Arguments
/// - `config` - Application configuration containing the ledger path
///
/// # Returns
/// - `Ok(LedgerService)` - Loaded ledger
/// - `Err(AppError)` - The ledger file exists but could not be read or parsed
pub async fn load_ledger(config: &Config) -> Result<LedgerService, AppError> {
    LedgerService::open(LedgerStore::new(&config.ledger_path)).await
}
