//! Command dispatch.
//!
//! `dispatch` parses a message, snapshots the guild, checks the administrator gate and
//! runs the matching handler. Every error a handler returns is rendered into exactly one
//! reply in the channel the command came from.

use std::future::Future;

use serenity::all::{Context, EditMessage, Message};

use crate::{
    bot::{directory, render},
    error::AppError,
    model::directory::GuildDirectory,
    state::AppState,
};

pub mod draw;
pub mod ledger;
pub mod members;
pub mod parse;

use parse::Command;

/// Everything a command handler needs for one invocation.
pub struct CommandContext<'a> {
    pub state: &'a AppState,
    pub ctx: &'a Context,
    pub message: &'a Message,
    pub directory: GuildDirectory,
}

impl CommandContext<'_> {
    /// Sends a message to the command's channel.
    pub async fn say(&self, content: impl Into<String>) -> Result<Message, AppError> {
        let content = content.into();
        self.bounded(
            "send message",
            self.message.channel_id.say(&self.ctx.http, content),
        )
        .await
    }

    /// Sends each chunk as its own message, stopping at the first failure.
    pub async fn say_all(&self, chunks: Vec<String>) -> Result<(), AppError> {
        for chunk in chunks {
            self.say(chunk).await?;
        }

        Ok(())
    }

    /// Replaces the content of a message previously sent by the bot.
    pub async fn edit(&self, message: &Message, content: impl Into<String>) -> Result<(), AppError> {
        let builder = EditMessage::new().content(content.into());
        let call = self
            .ctx
            .http
            .edit_message(message.channel_id, message.id, &builder, vec![]);

        self.bounded("edit message", call).await.map(|_| ())
    }

    /// Bounds a Discord call by the configured timeout.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = serenity::Result<T>>,
    {
        match tokio::time::timeout(self.state.config.discord_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::Timeout(operation)),
        }
    }
}

/// Parses and runs a prefixed command from a guild message.
///
/// Messages without the prefix are ignored. Failures are logged and reported back to the
/// channel; a failure to report is only logged.
pub async fn dispatch(state: &AppState, ctx: &Context, message: &Message) {
    let Some(parsed) = parse::parse(&message.content, &state.config.command_prefix) else {
        return;
    };
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let snapshot = directory::snapshot(ctx, guild_id, message.author.id, message.channel_id);

    let (directory, is_admin) = match snapshot {
        Ok(snapshot) => (snapshot.directory, snapshot.is_admin),
        Err(e) => {
            tracing::error!("Failed to snapshot guild {}: {}", guild_id, e);
            reply_error(state, ctx, message, &e).await;
            return;
        }
    };

    let cx = CommandContext {
        state,
        ctx,
        message,
        directory,
    };

    let result = match parsed {
        Ok(command) if command.requires_admin() && !is_admin => {
            tracing::debug!(
                "User {} denied {} in guild {}",
                message.author.id,
                command.name(),
                guild_id
            );
            cx.say(render::permission_denied()).await.map(|_| ())
        }
        Ok(command) => {
            tracing::debug!(
                "User {} runs {} in guild {}",
                message.author.id,
                command.name(),
                guild_id
            );
            run(&cx, command).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "Command from {} failed: {}", message.author.id, e);
        reply_error(state, ctx, message, &e).await;
    }
}

async fn run(cx: &CommandContext<'_>, command: Command) -> Result<(), AppError> {
    match command {
        Command::Register { name, count } => ledger::register(cx, &name, count).await,
        Command::RemoveEntries { name, count } => ledger::remove_entries(cx, &name, count).await,
        Command::Draw => draw::draw(cx).await,
        Command::GrantRoom { room } => draw::grant_room(cx, room.as_deref()).await,
        Command::ClearAll => ledger::clear_all(cx).await,
        Command::MyEntries => ledger::my_entries(cx).await,
        Command::ListParticipants => ledger::list_participants(cx).await,
        Command::ActiveMembers => members::active_members(cx).await,
        Command::ListMembers => members::list_members(cx).await,
    }
}

async fn reply_error(state: &AppState, ctx: &Context, message: &Message, error: &AppError) {
    let reply = message.channel_id.say(&ctx.http, error.user_message());

    match tokio::time::timeout(state.config.discord_timeout, reply).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::error!("Failed to send error reply: {}", e),
        Err(_) => tracing::error!("Timed out sending error reply"),
    }
}
