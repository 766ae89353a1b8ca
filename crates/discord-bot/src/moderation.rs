//! Moderation commands. Each one runs gate, validation, the guild change,
//! the audit event and the reply, in that order.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::model::id::{ChannelId, RoleId, UserId};
use tracing::warn;
use warden_core::{
    errors::WardenResult,
    models::{
        audit::{channel_ref, role_ref, user_ref, LogEvent},
        permissions::Capability,
        validation::{self, reason_or_default, RoleAction},
    },
};

use crate::{
    audit::AuditLogger, invocation::Invocation, platform::GuildPlatform, responder::Responder,
};

/// A member named in a command option.
#[derive(Debug, Clone)]
pub struct TargetUser {
    pub id: UserId,
    pub tag: String,
}

/// A role named in a command option.
#[derive(Debug, Clone)]
pub struct RoleRef {
    pub id: RoleId,
    pub name: String,
}

pub struct Moderation {
    platform: Arc<dyn GuildPlatform>,
    audit: AuditLogger,
}

impl Moderation {
    pub fn new(platform: Arc<dyn GuildPlatform>, audit: AuditLogger) -> Self {
        Self { platform, audit }
    }

    fn record(&self, invocation: &Invocation, event: LogEvent) {
        self.audit.log(event.with_actor(invocation.audit_context()));
    }

    pub async fn ban(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        reason: Option<&str>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::BanMembers)?;
        let guild = invocation.guild()?;
        let reason = reason_or_default(reason);

        self.platform.ban(guild, target.id, &reason).await?;

        self.record(
            invocation,
            LogEvent::new("🔨 BAN")
                .field("User", user_ref(target.id.0), false)
                .field("Reason", &reason, false),
        );
        responder.respond(&format!("✅ Banned {}.", target.tag)).await?;

        Ok(())
    }

    pub async fn kick(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        reason: Option<&str>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::KickMembers)?;
        let guild = invocation.guild()?;
        let reason = reason_or_default(reason);

        self.platform.kick(guild, target.id, &reason).await?;

        self.record(
            invocation,
            LogEvent::new("👢 KICK")
                .field("User", user_ref(target.id.0), false)
                .field("Reason", &reason, false),
        );
        responder.respond(&format!("✅ Kicked {}.", target.tag)).await?;

        Ok(())
    }

    pub async fn timeout(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        minutes: i64,
        reason: Option<&str>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ModerateMembers)?;
        let minutes = validation::timeout_minutes(minutes)?;
        let guild = invocation.guild()?;
        let reason = reason_or_default(reason);

        let until = Utc::now() + Duration::minutes(i64::from(minutes));
        self.platform.timeout(guild, target.id, Some(until)).await?;

        self.record(
            invocation,
            LogEvent::new("⏳ TIMEOUT")
                .field("User", user_ref(target.id.0), false)
                .field("Duration", format!("{} min", minutes), true)
                .field("Reason", &reason, false),
        );
        responder
            .respond(&format!("✅ Timed out {} for {} minutes.", target.tag, minutes))
            .await?;

        Ok(())
    }

    pub async fn untimeout(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        reason: Option<&str>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ModerateMembers)?;
        let guild = invocation.guild()?;
        let reason = reason_or_default(reason);

        self.platform.timeout(guild, target.id, None).await?;

        self.record(
            invocation,
            LogEvent::new("⌛ UNTIMEOUT")
                .field("User", user_ref(target.id.0), false)
                .field("Reason", &reason, false),
        );
        responder
            .respond(&format!("✅ Lifted the timeout for {}.", target.tag))
            .await?;

        Ok(())
    }

    pub async fn clear(
        &self,
        invocation: &Invocation,
        count: i64,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageMessages)?;
        let count = validation::clear_count(count)?;

        let deleted = self
            .platform
            .bulk_delete(invocation.channel_id, count)
            .await?;

        self.record(
            invocation,
            LogEvent::new("🧹 CLEAR").field("Deleted", format!("{} messages", deleted), false),
        );
        responder
            .respond(&format!("✅ Deleted {} messages.", deleted))
            .await?;

        Ok(())
    }

    pub async fn role(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        role: &RoleRef,
        action: RoleAction,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageRoles)?;
        let guild = invocation.guild()?;
        let reason = format!("Requested by {}", invocation.actor.tag);

        let (title, reply) = match action {
            RoleAction::Add => {
                self.platform
                    .add_role(guild, target.id, role.id, &reason)
                    .await?;
                ("➕ ROLE ADD", format!("✅ Gave {} to {}.", role.name, target.tag))
            }
            RoleAction::Remove => {
                self.platform
                    .remove_role(guild, target.id, role.id, &reason)
                    .await?;
                (
                    "➖ ROLE REMOVE",
                    format!("✅ Took {} from {}.", role.name, target.tag),
                )
            }
        };

        self.record(
            invocation,
            LogEvent::new(title)
                .field("User", user_ref(target.id.0), false)
                .field("Role", role_ref(role.id.0), false),
        );
        responder.respond(&reply).await?;

        Ok(())
    }

    /// Warn a member: a direct message plus an audit record.
    ///
    /// The warning is recorded even when the member does not accept direct
    /// messages.
    pub async fn warn(
        &self,
        invocation: &Invocation,
        target: &TargetUser,
        reason: &str,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ModerateMembers)?;
        invocation.guild()?;
        let reason = reason_or_default(Some(reason));

        let notice = format!("⚠️ You have been warned.\nReason: {}", reason);
        let delivered = match self.platform.send_dm(target.id, &notice).await {
            Ok(()) => true,
            Err(err) => {
                warn!(user = target.id.0, "Could not DM warned member: {:#}", err);
                false
            }
        };

        self.record(
            invocation,
            LogEvent::new("⚠️ WARN")
                .field("User", user_ref(target.id.0), false)
                .field("Reason", &reason, false)
                .field("DM delivered", if delivered { "yes" } else { "no" }, true),
        );

        let reply = if delivered {
            format!("✅ Warned {}.", target.tag)
        } else {
            format!("✅ Warned {} (could not send them a DM).", target.tag)
        };
        responder.respond(&reply).await?;

        Ok(())
    }

    pub async fn slowmode(
        &self,
        invocation: &Invocation,
        channel: ChannelId,
        seconds: i64,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageChannels)?;
        let seconds = validation::slowmode_seconds(seconds)?;

        self.platform.set_slowmode(channel, seconds).await?;

        self.record(
            invocation,
            LogEvent::new("🐢 SLOWMODE")
                .field("Channel", channel_ref(channel.0), false)
                .field("Interval", format!("{}s", seconds), true),
        );
        responder.respond("✅ Slowmode updated.").await?;

        Ok(())
    }
}
