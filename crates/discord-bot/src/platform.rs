//! The seam between Warden's controllers and Discord.
//!
//! Controllers only ever talk to a [`GuildPlatform`]. The production
//! implementation lives in [`discord`]; tests substitute a mock so every
//! gate and ordering rule can be checked without a gateway connection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serenity::model::{
    channel::PermissionOverwrite,
    id::{ChannelId, GuildId, RoleId, UserId},
};
use warden_core::models::audit::LogEvent;

pub mod discord;

/// Everything needed to provision a ticket channel.
#[derive(Debug, Clone)]
pub struct TicketChannelRequest {
    pub name: String,
    pub category: ChannelId,
    pub topic: String,
    pub overwrites: Vec<PermissionOverwrite>,
}

/// The parts of a guild channel the ticket flow reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
    pub topic: Option<String>,
}

#[async_trait]
pub trait GuildPlatform: Send + Sync {
    /// The bot's own user id.
    fn bot_id(&self) -> UserId;

    /// Post an audit event to `channel`.
    async fn send_log(&self, channel: ChannelId, event: &LogEvent) -> Result<()>;

    async fn create_ticket_channel(
        &self,
        guild: GuildId,
        request: &TicketChannelRequest,
    ) -> Result<ChannelId>;

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<()>;

    async fn fetch_channel(&self, channel: ChannelId) -> Result<ChannelInfo>;

    async fn delete_channel(&self, channel: ChannelId, reason: &str) -> Result<()>;

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> Result<()>;

    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> Result<()>;

    /// Time a member out until `until`, or lift the timeout when `None`.
    async fn timeout(
        &self,
        guild: GuildId,
        user: UserId,
        until: Option<DateTime<Utc>>,
    ) -> Result<()>;

    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId, reason: &str)
        -> Result<()>;

    async fn remove_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: &str,
    ) -> Result<()>;

    /// Delete up to `count` recent messages, returning how many went.
    async fn bulk_delete(&self, channel: ChannelId, count: u8) -> Result<usize>;

    async fn set_slowmode(&self, channel: ChannelId, seconds: u64) -> Result<()>;

    async fn send_dm(&self, user: UserId, content: &str) -> Result<()>;

    /// Position of `role` in the guild hierarchy, `None` if it no longer exists.
    async fn role_position(&self, guild: GuildId, role: RoleId) -> Result<Option<i64>>;

    /// Position of the highest role the bot holds in `guild`.
    async fn bot_top_role_position(&self, guild: GuildId) -> Result<i64>;
}
