//! Read-only member directory consumed by identity resolution and the draw engine.
//!
//! The core never talks to Discord directly. It queries a `MemberDirectory`: who is in the
//! server, what they are called, whether they are bots, what their presence is and which
//! voice room they are connected to. `GuildDirectory` is the owned snapshot the bot builds
//! from the serenity cache for each command.

use crate::model::ledger::UserId;

/// Presence status of a member as last reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    #[default]
    Offline,
}

impl PresenceStatus {
    /// Whether the member counts as active (online, idle or do-not-disturb).
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Offline)
    }
}

/// A single guild member as seen by the raffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryMember {
    pub id: UserId,
    /// Account-level display name (global name, else username).
    pub name: String,
    /// Guild nickname, which overrides `name` for display when present.
    pub nick: Option<String>,
    pub bot: bool,
    pub status: PresenceStatus,
    /// Voice channel the member is currently connected to.
    pub room: Option<u64>,
}

impl DirectoryMember {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nick: None,
            bot: false,
            status: PresenceStatus::Offline,
            room: None,
        }
    }

    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }

    pub fn with_status(mut self, status: PresenceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn in_room(mut self, room_id: u64) -> Self {
        self.room = Some(room_id);
        self
    }

    /// Name shown in listings: the nickname when set, otherwise the account name.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.name)
    }

    /// Every name the member can be addressed by, nickname first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nick.as_deref().into_iter().chain(std::iter::once(self.name.as_str()))
    }
}

/// A voice channel whose occupants gate draw and grant eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: u64,
    pub name: String,
}

impl Room {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Read-only view of the guild's members and voice rooms.
pub trait MemberDirectory {
    /// All members in directory iteration order.
    fn members(&self) -> &[DirectoryMember];

    /// All voice rooms.
    fn rooms(&self) -> &[Room];

    /// Looks up a member by id.
    fn member(&self, user_id: UserId) -> Option<&DirectoryMember> {
        self.members().iter().find(|member| member.id == user_id)
    }

    /// Display name for `user_id`, `None` when the user is no longer in the guild.
    fn display_name(&self, user_id: UserId) -> Option<&str> {
        self.member(user_id).map(DirectoryMember::display_name)
    }

    /// Finds a voice room by case-insensitive name.
    fn room_by_name(&self, name: &str) -> Option<&Room> {
        let wanted = name.to_lowercase();
        self.rooms()
            .iter()
            .find(|room| room.name.to_lowercase() == wanted)
    }

    /// Members currently connected to `room_id`.
    fn occupants(&self, room_id: u64) -> Vec<&DirectoryMember> {
        self.members()
            .iter()
            .filter(|member| member.room == Some(room_id))
            .collect()
    }
}

/// Owned directory snapshot.
#[derive(Debug, Clone, Default)]
pub struct GuildDirectory {
    members: Vec<DirectoryMember>,
    rooms: Vec<Room>,
}

impl GuildDirectory {
    pub fn new(members: Vec<DirectoryMember>, rooms: Vec<Room>) -> Self {
        Self { members, rooms }
    }
}

impl MemberDirectory for GuildDirectory {
    fn members(&self) -> &[DirectoryMember] {
        &self.members
    }

    fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}
