#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use serenity::model::{
    id::{ChannelId, GuildId, RoleId, UserId},
    Permissions,
};
use warden_core::models::audit::LogEvent;
use warden_discord_bot::{
    invocation::{Actor, Invocation},
    platform::{ChannelInfo, GuildPlatform, TicketChannelRequest},
    responder::Responder,
};

pub const GUILD: GuildId = GuildId(100);
pub const LOG_CHANNEL: ChannelId = ChannelId(200);
pub const COMMAND_CHANNEL: ChannelId = ChannelId(300);
pub const BOT: UserId = UserId(900);

// Mock Discord access for controller tests
mock! {
    pub Platform {}

    #[async_trait]
    impl GuildPlatform for Platform {
        fn bot_id(&self) -> UserId;
        async fn send_log(&self, channel: ChannelId, event: &LogEvent) -> eyre::Result<()>;
        async fn create_ticket_channel(
            &self,
            guild: GuildId,
            request: &TicketChannelRequest,
        ) -> eyre::Result<ChannelId>;
        async fn send_message(&self, channel: ChannelId, content: &str) -> eyre::Result<()>;
        async fn fetch_channel(&self, channel: ChannelId) -> eyre::Result<ChannelInfo>;
        async fn delete_channel(&self, channel: ChannelId, reason: &str) -> eyre::Result<()>;
        async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> eyre::Result<()>;
        async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> eyre::Result<()>;
        async fn timeout(
            &self,
            guild: GuildId,
            user: UserId,
            until: Option<DateTime<Utc>>,
        ) -> eyre::Result<()>;
        async fn add_role(
            &self,
            guild: GuildId,
            user: UserId,
            role: RoleId,
            reason: &str,
        ) -> eyre::Result<()>;
        async fn remove_role(
            &self,
            guild: GuildId,
            user: UserId,
            role: RoleId,
            reason: &str,
        ) -> eyre::Result<()>;
        async fn bulk_delete(&self, channel: ChannelId, count: u8) -> eyre::Result<usize>;
        async fn set_slowmode(&self, channel: ChannelId, seconds: u64) -> eyre::Result<()>;
        async fn send_dm(&self, user: UserId, content: &str) -> eyre::Result<()>;
        async fn role_position(&self, guild: GuildId, role: RoleId) -> eyre::Result<Option<i64>>;
        async fn bot_top_role_position(&self, guild: GuildId) -> eyre::Result<i64>;
    }
}

// Mock interaction replies
mock! {
    pub Reply {}

    #[async_trait]
    impl Responder for Reply {
        async fn defer(&self) -> eyre::Result<()>;
        async fn respond(&self, content: &str) -> eyre::Result<()>;
    }
}

/// A reply mock that accepts deferral and expects exactly one answer.
pub fn expect_reply(expected: &'static str) -> MockReply {
    let mut reply = MockReply::new();
    reply.expect_defer().returning(|| Ok(()));
    reply
        .expect_respond()
        .withf(move |content| content == expected)
        .times(1)
        .returning(|_| Ok(()));
    reply
}

/// An invocation from user `id` in the guild, holding `permissions`.
pub fn invocation(id: u64, name: &str, permissions: Permissions) -> Invocation {
    Invocation {
        guild_id: Some(GUILD),
        channel_id: COMMAND_CHANNEL,
        actor: Actor {
            id: UserId(id),
            tag: format!("{}#0001", name),
            name: name.to_string(),
            permissions: Some(permissions),
            roles: Vec::new(),
        },
    }
}
