//! Voice room resolution shared by draws and grants.

use crate::{
    error::{command::NotFoundError, draw::EmptyPoolError, AppError},
    model::directory::{DirectoryMember, MemberDirectory, Room},
};

/// Resolves `name` to a voice room that has at least one occupant.
///
/// # Arguments
/// - `directory` - Guild directory to search
/// - `name` - Room name, compared case-insensitively
///
/// # Returns
/// - `Ok((room, occupants))` - The room and everyone connected to it, bots included
/// - `Err(AppError::NotFoundErr)` - No voice room with that name
/// - `Err(AppError::EmptyPoolErr)` - The room exists but nobody is connected
pub fn occupied_room<'d, D>(
    directory: &'d D,
    name: &str,
) -> Result<(&'d Room, Vec<&'d DirectoryMember>), AppError>
where
    D: MemberDirectory + ?Sized,
{
    let room = directory
        .room_by_name(name)
        .ok_or_else(|| NotFoundError::Room(name.to_string()))?;

    let occupants = directory.occupants(room.id);
    if occupants.is_empty() {
        return Err(EmptyPoolError::EmptyRoom(room.name.clone()).into());
    }

    tracing::debug!(
        "Voice channel '{}' has {} occupants",
        room.name,
        occupants.len()
    );

    Ok((room, occupants))
}
