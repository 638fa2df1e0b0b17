use serenity::all::{Context, Message};

use crate::{bot::command, state::AppState};

/// Handle message creation in a channel
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    // Commands are only accepted from people, in guild channels
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    command::dispatch(state, &ctx, &message).await;
}
