//! Builds the raffle's member directory from the Serenity guild cache.
//!
//! The cache guard must not be held across an await, so each command takes an owned
//! `GuildDirectory` snapshot up front and works from that.

use serenity::all::{
    ChannelId, ChannelType, Context, Guild, GuildChannel, GuildId, Member, OnlineStatus, UserId,
};

use crate::{
    error::AppError,
    model::directory::{DirectoryMember, GuildDirectory, PresenceStatus, Room},
};

/// Directory snapshot plus the caller's administrator flag.
pub struct Snapshot {
    pub directory: GuildDirectory,
    pub is_admin: bool,
}

/// Snapshots the cached guild for one command invocation.
///
/// # Arguments
/// - `ctx` - Discord context with the cache
/// - `guild_id` - Guild the command was sent in
/// - `author` - User who sent the command
/// - `channel_id` - Channel the command was sent in, used for the permission check
///
/// # Returns
/// - `Ok(Snapshot)` - Directory and permission flag
/// - `Err(AppError::InternalError)` - The guild is not in the cache
pub fn snapshot(
    ctx: &Context,
    guild_id: GuildId,
    author: UserId,
    channel_id: ChannelId,
) -> Result<Snapshot, AppError> {
    let guild = ctx.cache.guild(guild_id).ok_or_else(|| {
        AppError::InternalError(format!("Guild {} is not in the cache", guild_id))
    })?;

    Ok(Snapshot {
        directory: guild_directory(&guild),
        is_admin: is_admin(&guild, author, channel_id),
    })
}

/// Converts cached guild data into an owned directory.
///
/// Members are ordered by user ID and rooms by channel position so that lookups that
/// take the first match are stable between invocations.
pub fn guild_directory(guild: &Guild) -> GuildDirectory {
    let mut members: Vec<DirectoryMember> = guild
        .members
        .values()
        .map(|member| {
            let user_id = member.user.id;
            let status = guild
                .presences
                .get(&user_id)
                .map(|presence| presence_status(presence.status))
                .unwrap_or_default();
            let room = guild
                .voice_states
                .get(&user_id)
                .and_then(|state| state.channel_id)
                .map(|channel_id| channel_id.get());

            directory_member(member, status, room)
        })
        .collect();
    members.sort_by_key(|member| member.id);

    let mut channels: Vec<&GuildChannel> = guild
        .channels
        .values()
        .filter(|channel| matches!(channel.kind, ChannelType::Voice | ChannelType::Stage))
        .collect();
    channels.sort_by_key(|channel| (channel.position, channel.id));
    let rooms = channels
        .into_iter()
        .map(|channel| Room::new(channel.id.get(), channel.name.clone()))
        .collect();

    GuildDirectory::new(members, rooms)
}

/// Whether `user_id` has the administrator permission where the command was sent.
///
/// Threads are checked against their parent channel. Unknown members or channels are
/// treated as not administrator.
pub fn is_admin(guild: &Guild, user_id: UserId, channel_id: ChannelId) -> bool {
    if guild.owner_id == user_id {
        return true;
    }

    let Some(member) = guild.members.get(&user_id) else {
        return false;
    };

    let channel = guild.channels.get(&channel_id).or_else(|| {
        guild
            .threads
            .iter()
            .find(|thread| thread.id == channel_id)
            .and_then(|thread| thread.parent_id)
            .and_then(|parent| guild.channels.get(&parent))
    });

    match channel {
        Some(channel) => guild.user_permissions_in(channel, member).administrator(),
        None => false,
    }
}

/// Converts a Serenity member into a directory entry.
pub(crate) fn directory_member(
    member: &Member,
    status: PresenceStatus,
    room: Option<u64>,
) -> DirectoryMember {
    let user = &member.user;

    DirectoryMember {
        id: user.id.get(),
        name: user.global_name.clone().unwrap_or_else(|| user.name.clone()),
        nick: member.nick.clone(),
        bot: user.bot,
        status,
        room,
    }
}

pub(crate) fn presence_status(status: OnlineStatus) -> PresenceStatus {
    match status {
        OnlineStatus::Online => PresenceStatus::Online,
        OnlineStatus::Idle => PresenceStatus::Idle,
        OnlineStatus::DoNotDisturb => PresenceStatus::DoNotDisturb,
        _ => PresenceStatus::Offline,
    }
}
