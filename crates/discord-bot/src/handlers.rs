use serenity::{
    async_trait,
    model::{
        application::{command::Command, interaction::Interaction},
        channel::{GuildChannel, Message},
        gateway::Ready,
        guild::Member,
        id::{ChannelId, GuildId, MessageId, RoleId},
    },
    prelude::*,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use warden_core::models::audit::{channel_ref, truncate_chars, user_ref, LogEvent};

pub mod commands;
pub mod options;

use crate::{
    audit::AuditLogger,
    autorole::AutoroleController,
    config::BotConfig,
    moderation::Moderation,
    platform::GuildPlatform,
    tickets::{TicketController, TicketSettings},
};

/// Longest slice of a deleted message's text kept in the audit log.
pub const DELETED_CONTENT_LIMIT: usize = 900;

/// Everything a command or event needs, built once at startup.
pub struct Services {
    pub audit: AuditLogger,
    pub tickets: TicketController,
    pub moderation: Moderation,
    pub autorole: AutoroleController,
}

impl Services {
    pub fn new(platform: Arc<dyn GuildPlatform>, config: &BotConfig) -> Self {
        let audit = AuditLogger::new(platform.clone(), ChannelId(config.log_channel_id));
        let settings = TicketSettings {
            category: ChannelId(config.ticket_category_id),
            support_role: RoleId(config.support_role_id),
            close_delay: config.close_delay(),
        };

        Self {
            tickets: TicketController::new(platform.clone(), audit.clone(), settings),
            moderation: Moderation::new(platform.clone(), audit.clone()),
            autorole: AutoroleController::new(platform, audit.clone(), config.autorole_id.map(RoleId)),
            audit,
        }
    }
}

/// What a command handler gets to work with.
#[derive(Clone)]
pub struct HandlerContext {
    pub ctx: Context,
    pub services: Arc<Services>,
}

/// The parts of a deleted message that survive in the cache.
#[derive(Debug, Clone, Default)]
pub struct DeletedMessage {
    pub author: Option<u64>,
    pub author_is_bot: bool,
    pub content: Option<String>,
}

impl From<&Message> for DeletedMessage {
    fn from(message: &Message) -> Self {
        Self {
            author: Some(message.author.id.0),
            author_is_bot: message.author.bot,
            content: Some(message.content.clone()),
        }
    }
}

/// Audit event for a deleted message, or `None` when it was the bot's own.
pub fn deleted_message_event(channel: ChannelId, message: &DeletedMessage) -> Option<LogEvent> {
    if message.author_is_bot {
        return None;
    }

    let author = message
        .author
        .map(user_ref)
        .unwrap_or_else(|| "Unknown".to_string());
    let content = match message.content.as_deref() {
        None => "*Not cached*".to_string(),
        Some(text) if text.trim().is_empty() => "*No text content*".to_string(),
        Some(text) => truncate_chars(text, DELETED_CONTENT_LIMIT),
    };

    Some(
        LogEvent::new("🗑️ Message Deleted")
            .field("Author", author, true)
            .field("Channel", channel_ref(channel.0), true)
            .field("Message", content, false),
    )
}

/// Main Discord handler that processes all events.
pub struct Handler {
    config: BotConfig,
    services: Arc<Services>,
}

impl Handler {
    pub fn new(config: BotConfig, services: Arc<Services>) -> Self {
        Self { config, services }
    }

    fn context(&self, ctx: Context) -> HandlerContext {
        HandlerContext {
            ctx,
            services: self.services.clone(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Register commands and announce that the bot is up.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Guild commands show up immediately; global ones can take an hour.
        let registered = match self.config.guild_id {
            Some(guild_id) => {
                GuildId(guild_id)
                    .set_application_commands(&ctx.http, |commands| {
                        crate::commands::register_commands(commands)
                    })
                    .await
            }
            None => {
                Command::set_global_application_commands(&ctx.http, |commands| {
                    crate::commands::register_commands(commands)
                })
                .await
            }
        };

        match registered {
            Ok(cmds) => {
                info!("Commands registered successfully! Total commands: {}", cmds.len());
                for cmd in cmds {
                    info!("Command registered: /{} - {}", cmd.name, cmd.description);
                }
            }
            Err(why) => {
                error!("Error registering commands: {:?}", why);
            }
        }

        self.services.audit.log(
            LogEvent::new("✅ Bot Online")
                .field("User", format!("{} ({})", ready.user.tag(), ready.user.id), true)
                .field("Guilds", ready.guilds.len().to_string(), true),
        );
    }

    /// Handle interactions (slash commands)
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            commands::run_command(self.context(ctx), command).await;
        }
    }

    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        let guild = new_member.guild_id;
        let user = new_member.user.id;

        if let Err(why) = self.services.autorole.on_member_join(guild, user).await {
            warn!(guild = guild.0, user = user.0, "Autorole grant failed: {:?}", why);
        }
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        if guild_id.is_none() {
            return;
        }

        let message = ctx
            .cache
            .message(channel_id, deleted_message_id)
            .map(|message| DeletedMessage::from(&message))
            .unwrap_or_default();

        if let Some(event) = deleted_message_event(channel_id, &message) {
            self.services.audit.log(event);
        }
    }

    async fn channel_delete(&self, _ctx: Context, channel: &GuildChannel) {
        if self.services.tickets.scheduler().cancel(channel.id).await {
            info!(channel = channel.id.0, "Channel deleted externally; dropped pending deletion");
        }
    }
}
