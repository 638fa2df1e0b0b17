mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;

use crate::{config::Config, error::AppError, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let ledger = startup::load_ledger(&config).await?;
    let state = AppState::new(ledger.clone(), config);

    tracing::info!("Starting raffle bot");

    let client = bot::start::init_bot(&state).await?;

    // Stop the shards on Ctrl+C so start_bot returns and the ledger can be flushed
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }

        tracing::info!("Shutdown signal received, stopping Discord bot");
        shard_manager.shutdown_all().await;
    });

    let bot_result = bot::start::start_bot(client).await;

    ledger.flush().await?;
    tracing::info!("Ledger flushed, shutting down");

    bot_result
}
