//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake.

use serenity::all::{ActivityData, Context, Ready};

use crate::state::AppState;

/// Handles the ready event when the bot connects to Discord.
///
/// Logs the connection and advertises the draw command in the bot's status.
///
/// # Arguments
/// - `state` - Application state, used for the command prefix
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::custom(format!(
        "🎟️ {}sorteo",
        state.config.command_prefix
    ))));
}
