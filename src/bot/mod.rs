//! Discord bot integration.
//!
//! This module connects the raffle to Discord through Serenity. The bot listens for
//! prefixed text commands, snapshots the guild cache into a `GuildDirectory` for each
//! command, runs the matching ledger or draw operation and replies in the channel.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel and voice channel data in the cache
//! - `GUILD_MESSAGES` / `MESSAGE_CONTENT` - Receive and read text commands
//! - `GUILD_MEMBERS` - Full member list for name resolution (privileged intent)
//! - `GUILD_PRESENCES` - Online status for the active members listing (privileged intent)
//! - `GUILD_VOICE_STATES` - Which voice channel each member is connected to
//!
//! Note: `GUILD_MEMBERS`, `GUILD_PRESENCES` and `MESSAGE_CONTENT` are privileged intents and
//! must be explicitly enabled in the Discord Developer Portal for the bot application.

pub mod command;
pub mod directory;
pub mod handler;
pub mod render;
pub mod start;
