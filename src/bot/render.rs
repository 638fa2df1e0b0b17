//! Message text for every command reply.
//!
//! Replies are Spanish, as the bot's community has always used it. Anything that can grow
//! with the guild size goes through `chunk` so it fits Discord's message limit.

use crate::{
    model::{
        directory::{DirectoryMember, PresenceStatus},
        draw::{Candidate, SpinFrame},
    },
    service::draw::DrawSession,
};

/// Discord's maximum message length, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

const DRAW_HEADER: &str = "🎉 ¡Comenzando el sorteo! 🎉";

/// "1 participación" / "n participaciones".
pub fn entries(count: impl Into<i64>) -> String {
    let count = count.into();
    if count == 1 {
        "1 participación".to_string()
    } else {
        format!("{} participaciones", count)
    }
}

pub fn registered(name: &str, count: i64, total: u32) -> String {
    format!(
        "✅ **{}** se ha inscrito con {} más. Ahora tiene {}. ¡Buena suerte!",
        name,
        entries(count),
        entries(total)
    )
}

pub fn removed(name: &str, count: i64, remaining: u32) -> String {
    format!(
        "🗑️ Se han eliminado {} de **{}**. Le quedan {}.",
        entries(count),
        name,
        entries(remaining)
    )
}

pub fn cleared() -> String {
    "✅ Todas las participaciones han sido eliminadas.".to_string()
}

pub fn my_entries(count: u32) -> String {
    if count == 0 {
        "No tienes participaciones en el sorteo.".to_string()
    } else {
        format!("🎟️ Tienes {} en el sorteo.", entries(count))
    }
}

pub fn granted(room: &str, members: usize) -> String {
    format!(
        "✅ Se ha sumado 1 participación a {} miembros en el canal de voz '{}'.",
        members, room
    )
}

pub fn permission_denied() -> String {
    "❌ No tienes permisos de administrador para ejecutar este comando.".to_string()
}

pub fn draw_started() -> String {
    format!("{}\n🌀 Preparándose para girar la ruleta...", DRAW_HEADER)
}

/// The candidate list with odds, with the frame's highlighted candidate in bold.
pub fn spin(session: &DrawSession, frame: &SpinFrame<'_>) -> String {
    let lines: Vec<String> = session
        .candidates()
        .iter()
        .map(|candidate| {
            let line = format!(
                "{}: {} ({:.2}%)",
                candidate.name,
                entries(candidate.entries),
                session.percentage(candidate)
            );
            if candidate.user_id == frame.highlighted.user_id {
                format!("➡️ **{}**", line)
            } else {
                format!("• {}", line)
            }
        })
        .collect();

    format!(
        "{}\n{}\n\n🌀 ¡Girando! **{}**",
        DRAW_HEADER,
        lines.join("\n"),
        frame.highlighted.name
    )
}

pub fn winner(candidate: &Candidate) -> String {
    format!("🎉 ¡El ganador del sorteo es **{}**! 🎉", candidate.name)
}

pub fn winner_removed(name: &str) -> String {
    format!(
        "🗑️ Se ha eliminado al usuario **{}** de la lista de participantes.",
        name
    )
}

/// Listing posted after a draw commits.
pub fn updated_listing(listing: &[(String, u32)]) -> Vec<String> {
    if listing.is_empty() {
        return vec!["📋 **No quedan participantes.**".to_string()];
    }

    chunk(
        "📋 Participaciones actualizadas:",
        listing
            .iter()
            .map(|(name, count)| format!("**{}**: {}", name, entries(*count))),
    )
}

/// Reply to `list-participants`.
pub fn participants(listing: &[(String, u32)]) -> Vec<String> {
    if listing.is_empty() {
        return vec!["❌ No hay participantes registrados en el sorteo.".to_string()];
    }

    chunk(
        "📋 Participantes en el sorteo:",
        listing
            .iter()
            .map(|(name, count)| format!("• **{}**: {}", name, entries(*count))),
    )
}

pub fn active_members<'a, I>(members: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DirectoryMember>,
{
    let mut lines = members
        .into_iter()
        .map(|member| format!("{} {}", status_marker(member.status), member.display_name()))
        .peekable();

    if lines.peek().is_none() {
        return vec!["No hay usuarios activos en este momento.".to_string()];
    }

    chunk("👥 Usuarios activos:", lines)
}

pub fn member_list<'a, I>(members: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DirectoryMember>,
{
    chunk(
        "👥 Miembros del servidor:",
        members
            .into_iter()
            .map(|member| format!("• {}", member.display_name())),
    )
}

fn status_marker(status: PresenceStatus) -> &'static str {
    match status {
        PresenceStatus::Online => "🟢",
        PresenceStatus::Idle => "🟡",
        PresenceStatus::DoNotDisturb => "🔴",
        PresenceStatus::Offline => "⚫",
    }
}

/// Joins `header` and `lines` into messages no longer than `MESSAGE_LIMIT` characters.
///
/// Messages are only split between lines. A single line longer than the limit is cut at
/// a character boundary.
pub fn chunk<I>(header: &str, lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut messages = Vec::new();
    let mut current = header.to_string();
    let mut current_len = current.chars().count();

    for line in lines {
        for piece in split_long(line) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > MESSAGE_LIMIT {
                messages.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if current_len > 0 {
        messages.push(current);
    }

    messages
}

fn split_long(line: String) -> Vec<String> {
    if line.chars().count() <= MESSAGE_LIMIT {
        return vec![line];
    }

    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(MESSAGE_LIMIT)
        .map(|piece| piece.iter().collect())
        .collect()
}
