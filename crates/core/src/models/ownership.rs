//! Ticket ownership is stored in the ticket channel's topic.
//!
//! The topic is the only record of who opened a ticket, so closing a ticket
//! re-derives the owner from it every time.

use std::sync::LazyLock;

use regex::Regex;

use super::audit::truncate_chars;

/// Discord's channel topic limit, in characters.
pub const TOPIC_LIMIT: usize = 1024;

const OWNER_MARKER: &str = "Ticket Owner:";

// The id is the number directly in front of the separator `encode` writes,
// so neither the tag nor the reason can stand in for it.
static OWNER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Ticket Owner: .*? \((\d+)\) \| Reason: ").expect("owner pattern is a valid regex")
});

/// Render the topic for a freshly opened ticket.
pub fn encode(owner_tag: &str, owner_id: u64, reason: &str) -> String {
    let text = format!(
        "{} {} ({}) | Reason: {}",
        OWNER_MARKER, owner_tag, owner_id, reason
    );
    truncate_chars(&text, TOPIC_LIMIT)
}

/// Recover the owner id from a ticket topic.
///
/// Returns `None` when the topic was not written by [`encode`], was edited
/// beyond recognition, or carries an id that does not fit a snowflake.
pub fn decode(topic: &str) -> Option<u64> {
    OWNER_PATTERN
        .captures(topic)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
