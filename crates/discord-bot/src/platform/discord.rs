use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use serenity::{
    http::Http,
    model::{
        channel::ChannelType,
        id::{ChannelId, GuildId, MessageId, RoleId, UserId},
        Timestamp,
    },
    utils::Color,
};
use tracing::debug;
use warden_core::models::audit::{truncate_chars, LogEvent};

use super::{ChannelInfo, GuildPlatform, TicketChannelRequest};

/// Discord refuses to bulk delete messages older than two weeks.
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Discord's audit log reason limit.
const AUDIT_REASON_LIMIT: usize = 512;

/// [`GuildPlatform`] backed by serenity's REST client.
pub struct SerenityPlatform {
    http: Arc<Http>,
    bot_id: UserId,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>, bot_id: UserId) -> Self {
        Self { http, bot_id }
    }
}

#[async_trait]
impl GuildPlatform for SerenityPlatform {
    fn bot_id(&self) -> UserId {
        self.bot_id
    }

    async fn send_log(&self, channel: ChannelId, event: &LogEvent) -> Result<()> {
        let fields = event.rendered_fields();

        channel
            .send_message(&self.http, |m| {
                m.embed(|e| {
                    e.title(&event.title)
                        .color(Color::ORANGE)
                        .timestamp(Timestamp::now());
                    for field in &fields {
                        e.field(&field.name, &field.value, field.inline);
                    }
                    e
                })
            })
            .await?;

        Ok(())
    }

    async fn create_ticket_channel(
        &self,
        guild: GuildId,
        request: &TicketChannelRequest,
    ) -> Result<ChannelId> {
        let channel = guild
            .create_channel(&self.http, |c| {
                c.name(&request.name)
                    .kind(ChannelType::Text)
                    .category(request.category)
                    .topic(&request.topic)
                    .permissions(request.overwrites.clone())
            })
            .await?;

        Ok(channel.id)
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<()> {
        channel.say(&self.http, content).await?;
        Ok(())
    }

    async fn fetch_channel(&self, channel: ChannelId) -> Result<ChannelInfo> {
        let channel = self
            .http
            .get_channel(channel.0)
            .await?
            .guild()
            .ok_or_else(|| eyre!("Channel {} is not a guild channel", channel))?;

        Ok(ChannelInfo {
            id: channel.id,
            name: channel.name,
            topic: channel.topic,
        })
    }

    async fn delete_channel(&self, channel: ChannelId, reason: &str) -> Result<()> {
        debug!(channel = channel.0, reason, "Deleting channel");
        channel.delete(&self.http).await?;
        Ok(())
    }

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> Result<()> {
        guild
            .ban_with_reason(&self.http, user, 0, truncate_chars(reason, AUDIT_REASON_LIMIT))
            .await?;
        Ok(())
    }

    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> Result<()> {
        guild
            .kick_with_reason(&self.http, user, &truncate_chars(reason, AUDIT_REASON_LIMIT))
            .await?;
        Ok(())
    }

    async fn timeout(
        &self,
        guild: GuildId,
        user: UserId,
        until: Option<DateTime<Utc>>,
    ) -> Result<()> {
        guild
            .edit_member(&self.http, user, |m| match until {
                Some(until) => m.disable_communication_until(until.to_rfc3339()),
                None => m.enable_communication(),
            })
            .await?;
        Ok(())
    }

    async fn add_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<()> {
        debug!(guild = guild.0, user = user.0, role = role.0, reason, "Adding role");
        let mut member = self.http.get_member(guild.0, user.0).await?;
        member.add_role(&self.http, role).await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<()> {
        debug!(guild = guild.0, user = user.0, role = role.0, reason, "Removing role");
        let mut member = self.http.get_member(guild.0, user.0).await?;
        member.remove_role(&self.http, role).await?;
        Ok(())
    }

    async fn bulk_delete(&self, channel: ChannelId, count: u8) -> Result<usize> {
        let messages = channel
            .messages(&self.http, |retriever| retriever.limit(u64::from(count)))
            .await?;

        let cutoff = Utc::now().timestamp() - BULK_DELETE_MAX_AGE_SECS;
        let ids: Vec<MessageId> = messages
            .iter()
            .filter(|message| message.timestamp.unix_timestamp() > cutoff)
            .map(|message| message.id)
            .collect();

        match ids.as_slice() {
            [] => {}
            [single] => channel.delete_message(&self.http, *single).await?,
            many => channel.delete_messages(&self.http, many.iter()).await?,
        }

        Ok(ids.len())
    }

    async fn set_slowmode(&self, channel: ChannelId, seconds: u64) -> Result<()> {
        channel
            .edit(&self.http, |c| c.rate_limit_per_user(seconds))
            .await?;
        Ok(())
    }

    async fn send_dm(&self, user: UserId, content: &str) -> Result<()> {
        let dm = user.create_dm_channel(&self.http).await?;
        dm.say(&self.http, content).await?;
        Ok(())
    }

    async fn role_position(&self, guild: GuildId, role: RoleId) -> Result<Option<i64>> {
        let roles = self.http.get_guild_roles(guild.0).await?;

        Ok(roles
            .into_iter()
            .find(|candidate| candidate.id == role)
            .map(|found| found.position))
    }

    async fn bot_top_role_position(&self, guild: GuildId) -> Result<i64> {
        let member = self.http.get_member(guild.0, self.bot_id.0).await?;
        let roles = self.http.get_guild_roles(guild.0).await?;

        Ok(roles
            .iter()
            .filter(|role| member.roles.contains(&role.id))
            .map(|role| role.position)
            .max()
            .unwrap_or(0))
    }
}
