use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord client with the raffle event handler attached.
///
/// # Arguments
/// - `state` - Application state shared with every event
///
/// # Returns
/// - `Ok(Client)` - Client ready to start; its `shard_manager` can be used for shutdown
/// - `Err(AppError)` - Client construction failed (invalid token format, etc.)
pub async fn init_bot(state: &AppState) -> Result<Client, AppError> {
    // GUILD_MEMBERS, GUILD_PRESENCES and MESSAGE_CONTENT are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES
        | GatewayIntents::GUILD_VOICE_STATES;

    let client = Client::builder(&state.config.discord_token, intents)
        .event_handler(Handler::new(state.clone()))
        .await?;

    Ok(client)
}

/// Runs the Discord client until its shards are shut down.
///
/// Should be awaited from the main task; it returns once `shutdown_all` has been called on
/// the client's shard manager or the connection fails.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
