//! Ticket lifecycle: open a private channel, close it, delete it later.

use std::sync::Arc;
use std::time::Duration;

use serenity::model::{
    channel::{PermissionOverwrite, PermissionOverwriteType},
    id::{ChannelId, GuildId, RoleId, UserId},
    Permissions,
};
use tracing::info;
use warden_core::{
    errors::{WardenError, WardenResult},
    models::{
        audit::{channel_ref, truncate_chars, user_ref, LogEvent},
        ownership,
        permissions::Capability,
        ticket::{self, TicketEvent, TicketState},
        validation::{reason_or_default, REASON_LIMIT},
    },
};

use crate::{
    audit::AuditLogger,
    deletion::DeletionScheduler,
    invocation::Invocation,
    platform::{GuildPlatform, TicketChannelRequest},
    responder::Responder,
};

/// Guild wiring for tickets.
#[derive(Debug, Clone, Copy)]
pub struct TicketSettings {
    pub category: ChannelId,
    pub support_role: RoleId,
    pub close_delay: Duration,
}

/// Access list for a new ticket channel.
///
/// Hidden from everyone; the opener and the support role may talk and
/// attach; the bot may also manage the channel so it can delete it later.
pub fn ticket_overwrites(
    guild: GuildId,
    opener: UserId,
    support_role: RoleId,
    bot: UserId,
) -> Vec<PermissionOverwrite> {
    let participant = Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES
        | Permissions::EMBED_LINKS;

    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            // @everyone shares the guild's id
            kind: PermissionOverwriteType::Role(RoleId(guild.0)),
        },
        PermissionOverwrite {
            allow: participant,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(opener),
        },
        PermissionOverwrite {
            allow: participant,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(support_role),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::READ_MESSAGE_HISTORY
                | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot),
        },
    ]
}

pub struct TicketController {
    platform: Arc<dyn GuildPlatform>,
    audit: AuditLogger,
    scheduler: DeletionScheduler,
    settings: TicketSettings,
}

impl TicketController {
    pub fn new(
        platform: Arc<dyn GuildPlatform>,
        audit: AuditLogger,
        settings: TicketSettings,
    ) -> Self {
        Self {
            scheduler: DeletionScheduler::new(platform.clone()),
            platform,
            audit,
            settings,
        }
    }

    pub fn scheduler(&self) -> &DeletionScheduler {
        &self.scheduler
    }

    /// Open a new ticket for the invoker.
    ///
    /// Every call opens a fresh channel; an owner may hold several tickets.
    pub async fn create(
        &self,
        invocation: &Invocation,
        reason: Option<&str>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        let guild = invocation.guild()?;
        let actor = &invocation.actor;
        let reason = truncate_chars(&reason_or_default(reason), REASON_LIMIT);

        // Channel creation is slow enough to outlive the interaction window.
        responder.defer().await?;

        let request = TicketChannelRequest {
            name: ticket::channel_name(&actor.name),
            category: self.settings.category,
            topic: ownership::encode(&actor.tag, actor.id.0, &reason),
            overwrites: ticket_overwrites(
                guild,
                actor.id,
                self.settings.support_role,
                self.platform.bot_id(),
            ),
        };
        let channel = self.platform.create_ticket_channel(guild, &request).await?;

        info!(channel = channel.0, owner = actor.id.0, "Ticket opened");

        let welcome = format!(
            "🎫 <@{}> opened a ticket.\nReason: **{}**\nSupport: <@&{}>",
            actor.id.0, reason, self.settings.support_role.0
        );
        self.platform.send_message(channel, &welcome).await?;

        self.audit.log(
            LogEvent::new("🎫 TICKET CREATE")
                .field("Ticket", channel_ref(channel.0), false)
                .field("Reason", &reason, false)
                .with_actor(invocation.audit_context()),
        );

        responder
            .respond(&format!("✅ Ticket opened: <#{}>", channel.0))
            .await?;

        Ok(())
    }

    /// Close the ticket the command was run in.
    ///
    /// The owner recorded in the channel topic, any member with
    /// manage-channels, and the support role may close. Deletion happens
    /// after the configured delay.
    pub async fn close(
        &self,
        invocation: &Invocation,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        let channel = self.platform.fetch_channel(invocation.channel_id).await?;
        if !ticket::is_ticket_channel(&channel.name) {
            return Err(WardenError::WrongChannel);
        }

        let owner = channel.topic.as_deref().and_then(ownership::decode);
        let authorized = owner == Some(invocation.actor.id.0)
            || invocation.permits(Capability::ManageChannels)
            || invocation.has_role(self.settings.support_role);

        let next = TicketState::Open.transition(TicketEvent::Close { authorized });
        if next != Some(TicketState::Closing) {
            return Err(WardenError::Authorization);
        }

        let owner_text = match owner {
            Some(id) => user_ref(id),
            None => "unknown".to_string(),
        };
        self.audit.log(
            LogEvent::new("🎫 TICKET CLOSE")
                .field("Ticket", format!("#{} (`{}`)", channel.name, channel.id.0), false)
                .field("Owner", owner_text, false)
                .with_actor(invocation.audit_context()),
        );

        // The deletion must not hinge on the acknowledgment getting through.
        let delay = self.settings.close_delay;
        let acknowledged = responder
            .respond(&format!(
                "✅ This ticket will be deleted in {} seconds.",
                delay.as_secs()
            ))
            .await;

        self.scheduler
            .schedule(
                channel.id,
                delay,
                format!("Ticket closed by {}", invocation.actor.tag),
            )
            .await;

        acknowledged?;
        Ok(())
    }
}
