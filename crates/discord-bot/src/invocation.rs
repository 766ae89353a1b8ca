use serenity::model::{
    application::interaction::application_command::ApplicationCommandInteraction,
    id::{ChannelId, GuildId, RoleId, UserId},
    Permissions,
};
use warden_core::{
    errors::{WardenError, WardenResult},
    models::{
        audit::ActorContext,
        permissions::{self, Capability},
    },
};

/// The member who triggered a command.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: UserId,
    /// `name#discriminator`
    pub tag: String,
    pub name: String,
    /// Resolved channel permissions; absent outside a guild.
    pub permissions: Option<Permissions>,
    pub roles: Vec<RoleId>,
}

/// A slash command invocation stripped down to what the controllers need.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub actor: Actor,
}

impl Invocation {
    pub fn from_command(command: &ApplicationCommandInteraction) -> Self {
        let member = command.member.as_ref();

        Self {
            guild_id: command.guild_id,
            channel_id: command.channel_id,
            actor: Actor {
                id: command.user.id,
                tag: command.user.tag(),
                name: command.user.name.clone(),
                permissions: member.and_then(|m| m.permissions),
                roles: member.map(|m| m.roles.clone()).unwrap_or_default(),
            },
        }
    }

    pub fn guild(&self) -> WardenResult<GuildId> {
        self.guild_id
            .ok_or_else(|| WardenError::Validation("Use this command inside a server.".to_string()))
    }

    pub fn permits(&self, capability: Capability) -> bool {
        permissions::permits(self.actor.permissions.map(|p| p.bits()), capability)
    }

    /// The permission gate. Must run before any guild mutation.
    pub fn require(&self, capability: Capability) -> WardenResult<()> {
        if self.permits(capability) {
            Ok(())
        } else {
            Err(WardenError::Authorization)
        }
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.actor.roles.contains(&role)
    }

    pub fn audit_context(&self) -> ActorContext {
        ActorContext {
            user_id: self.actor.id.0,
            channel_id: self.channel_id.0,
            guild_id: self.guild_id.map(|g| g.0),
        }
    }
}
