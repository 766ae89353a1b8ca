//! The permission gate every gated command runs before touching the guild.

use std::fmt;

/// Discord's administrator bit. Holders implicitly have every capability.
pub const ADMINISTRATOR: u64 = 1 << 3;

/// A named permission bit an actor must hold to perform a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    KickMembers,
    BanMembers,
    ManageChannels,
    ManageMessages,
    ManageRoles,
    ModerateMembers,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::KickMembers,
        Capability::BanMembers,
        Capability::ManageChannels,
        Capability::ManageMessages,
        Capability::ManageRoles,
        Capability::ModerateMembers,
    ];

    /// The Discord permission bit backing this capability.
    pub const fn bits(self) -> u64 {
        match self {
            Capability::KickMembers => 1 << 1,
            Capability::BanMembers => 1 << 2,
            Capability::ManageChannels => 1 << 4,
            Capability::ManageMessages => 1 << 13,
            Capability::ManageRoles => 1 << 28,
            Capability::ModerateMembers => 1 << 40,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::KickMembers => "kick-members",
            Capability::BanMembers => "ban-members",
            Capability::ManageChannels => "manage-channels",
            Capability::ManageMessages => "manage-messages",
            Capability::ManageRoles => "manage-roles",
            Capability::ModerateMembers => "moderate-members",
        };
        f.write_str(name)
    }
}

/// Decide whether an actor's permission set grants `required`.
///
/// An absent permission set (the interaction did not come from a guild
/// member) always denies.
pub fn permits(actor: Option<u64>, required: Capability) -> bool {
    match actor {
        Some(bits) => bits & ADMINISTRATOR != 0 || bits & required.bits() == required.bits(),
        None => false,
    }
}
