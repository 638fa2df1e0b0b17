//! Application state shared across all command handlers.
//!
//! `AppState` holds the single ledger, the draw engine built on top of it and the
//! configuration. It is created once during startup and cloned into the bot's event
//! handler; every field is reference-counted so clones share the same ledger.

use std::sync::Arc;

use crate::{
    config::Config,
    service::{draw::DrawEngine, identity::IdentityResolver, ledger::LedgerService},
};

#[derive(Clone)]
pub struct AppState {
    /// The single entry ledger; every mutation goes through it.
    pub ledger: LedgerService,

    /// Draw engine sharing `ledger`, serializing draws.
    pub draw: DrawEngine,

    /// Name resolver configured with the match strategy.
    pub resolver: Arc<IdentityResolver>,

    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the application state around a loaded ledger.
    ///
    /// # Arguments
    /// - `ledger` - Ledger loaded at startup
    /// - `config` - Application configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized state ready to hand to the bot
    pub fn new(ledger: LedgerService, config: Config) -> Self {
        Self {
            draw: DrawEngine::new(ledger.clone())
                .with_reveal(config.spin_steps, config.spin_delay),
            resolver: Arc::new(IdentityResolver::new(config.match_strategy)),
            ledger,
            config: Arc::new(config),
        }
    }
}
