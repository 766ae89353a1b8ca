//! Ticket naming and lifecycle rules.

/// Every ticket channel name starts with this literal.
pub const TICKET_PREFIX: &str = "ticket-";

/// Name used when the opener's display name has no usable characters.
pub const FALLBACK_NAME: &str = "user";

const NAME_LIMIT: usize = 12;

/// Derive a ticket channel name from the opener's display name.
///
/// The name is lower-cased, stripped to `[a-z0-9-_]`, cut to twelve
/// characters and prefixed with [`TICKET_PREFIX`].
pub fn channel_name(display_name: &str) -> String {
    let safe: String = display_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .take(NAME_LIMIT)
        .collect();

    if safe.is_empty() {
        format!("{}{}", TICKET_PREFIX, FALLBACK_NAME)
    } else {
        format!("{}{}", TICKET_PREFIX, safe)
    }
}

pub fn is_ticket_channel(name: &str) -> bool {
    name.starts_with(TICKET_PREFIX)
}

/// Where a ticket is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Absent,
    Open,
    Closing,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketEvent {
    Create,
    Close { authorized: bool },
    DeletionFired,
}

impl TicketState {
    /// Apply `event`, returning `None` when the event has no meaning in the
    /// current state.
    ///
    /// A rejected close leaves the ticket open. Creating never touches an
    /// existing ticket: every create starts a new one from `Absent`.
    pub fn transition(self, event: TicketEvent) -> Option<TicketState> {
        match (self, event) {
            (TicketState::Absent, TicketEvent::Create) => Some(TicketState::Open),
            (TicketState::Open, TicketEvent::Close { authorized: true }) => {
                Some(TicketState::Closing)
            }
            (TicketState::Open, TicketEvent::Close { authorized: false }) => {
                Some(TicketState::Open)
            }
            (TicketState::Closing, TicketEvent::DeletionFired) => Some(TicketState::Deleted),
            _ => None,
        }
    }
}
