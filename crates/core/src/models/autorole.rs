/// Whether the bot may hand out a role at `role_position`.
///
/// Discord only lets a member manage roles strictly below its own highest
/// role, so a role at or above the bot's top position is refused.
pub fn can_grant(role_position: i64, bot_top_position: i64) -> bool {
    role_position < bot_top_position
}
