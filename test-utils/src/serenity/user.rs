//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Builds the JSON payload Discord sends for a user object.
pub(crate) fn user_json(
    user_id: u64,
    username: &str,
    global_name: Option<&str>,
    bot: bool,
) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": null,
        "bot": bot,
        "system": false,
        "public_flags": 0,
    })
}

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Unique account username
/// - `global_name` - Optional global display name
/// - `bot` - Whether the account is a bot
///
/// # Returns
/// - `User` - A valid Serenity User struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, global_name: Option<&str>, bot: bool) -> User {
    serde_json::from_value(user_json(user_id, username, global_name, bot))
        .expect("Failed to create test user - invalid JSON structure")
}
