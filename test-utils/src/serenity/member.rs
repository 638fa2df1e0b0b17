//! Test factory for creating Serenity guild Member objects.
//!
//! Members are what the guild cache hands back for every user in a server. The raffle
//! bot reads their nickname, global name and bot flag to build its member directory.

use serenity::all::Member;

use super::user::user_json;

/// Creates a test Serenity Member with customizable fields.
///
/// The user's global name is left unset so `Member::display_name` falls back to the
/// nickname when present, otherwise to the username.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `guild_id` - Guild the member belongs to
/// - `username` - Account username
/// - `nick` - Optional guild nickname
/// - `bot` - Whether the account is a bot
///
/// # Returns
/// - `Member` - A valid Serenity Member struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::member::create_test_member;
///
/// let member = create_test_member(111, 999, "ana_account", Some("Ana"), false);
/// assert_eq!(member.display_name(), "Ana");
/// ```
pub fn create_test_member(
    user_id: u64,
    guild_id: u64,
    username: &str,
    nick: Option<&str>,
    bot: bool,
) -> Member {
    serde_json::from_value(serde_json::json!({
        "user": user_json(user_id, username, None, bot),
        "nick": nick,
        "avatar": null,
        "roles": [],
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
