use std::sync::Arc;

use serenity::model::id::{GuildId, RoleId, UserId};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use warden_core::{
    errors::{WardenError, WardenResult},
    models::{
        audit::{role_ref, user_ref, LogEvent},
        autorole::can_grant,
        permissions::Capability,
    },
};

use crate::{
    audit::AuditLogger, invocation::Invocation, moderation::RoleRef, platform::GuildPlatform,
    responder::Responder,
};

/// Owns the role handed to every member who joins.
///
/// The role lives only in process memory; it is seeded from configuration
/// at startup and lost on restart.
pub struct AutoroleController {
    platform: Arc<dyn GuildPlatform>,
    audit: AuditLogger,
    role: RwLock<Option<RoleId>>,
}

impl AutoroleController {
    pub fn new(platform: Arc<dyn GuildPlatform>, audit: AuditLogger, seed: Option<RoleId>) -> Self {
        Self {
            platform,
            audit,
            role: RwLock::new(seed),
        }
    }

    pub async fn current(&self) -> Option<RoleId> {
        *self.role.read().await
    }

    pub async fn set(
        &self,
        invocation: &Invocation,
        role: Option<&RoleRef>,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageRoles)?;
        let role = role
            .ok_or_else(|| WardenError::Validation("Pick a role to grant.".to_string()))?;

        *self.role.write().await = Some(role.id);
        info!(role = role.id.0, "Autorole set");

        self.audit.log(
            LogEvent::new("🧩 AUTOROLE SET")
                .field("Role", role_ref(role.id.0), false)
                .with_actor(invocation.audit_context()),
        );
        responder
            .respond(&format!("✅ New members will get {}.", role.name))
            .await?;

        Ok(())
    }

    pub async fn disable(
        &self,
        invocation: &Invocation,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageRoles)?;

        *self.role.write().await = None;
        info!("Autorole disabled");

        self.audit.log(
            LogEvent::new("🧩 AUTOROLE DISABLE")
                .field("Status", "Disabled", false)
                .with_actor(invocation.audit_context()),
        );
        responder.respond("✅ Autorole disabled.").await?;

        Ok(())
    }

    pub async fn show(
        &self,
        invocation: &Invocation,
        responder: &dyn Responder,
    ) -> WardenResult<()> {
        invocation.require(Capability::ManageRoles)?;

        let reply = match self.current().await {
            Some(role) => format!("✅ Autorole: <@&{}>", role.0),
            None => "❌ Autorole is disabled.".to_string(),
        };
        responder.respond(&reply).await?;

        Ok(())
    }

    /// Grant the configured role to a member who just joined.
    ///
    /// The role hierarchy is checked on every grant because the bot's own
    /// roles may have changed since the autorole was set.
    pub async fn on_member_join(&self, guild: GuildId, member: UserId) -> WardenResult<()> {
        let Some(role) = self.current().await else {
            return Ok(());
        };

        let Some(position) = self.platform.role_position(guild, role).await? else {
            debug!(role = role.0, "Autorole no longer exists; skipping");
            return Ok(());
        };

        let bot_top = self.platform.bot_top_role_position(guild).await?;
        if !can_grant(position, bot_top) {
            warn!(
                role = role.0,
                position, bot_top, "Autorole sits at or above the bot's highest role"
            );
            self.audit.log(
                LogEvent::new("⛔ AUTOROLE ERROR")
                    .field("Member", user_ref(member.0), false)
                    .field("Role", role_ref(role.0), false)
                    .field(
                        "Problem",
                        "The role is at or above my highest role; move my role higher.",
                        false,
                    ),
            );
            return Ok(());
        }

        self.platform
            .add_role(guild, member, role, "AutoRole")
            .await?;

        self.audit.log(
            LogEvent::new("✅ AutoRole")
                .field("Member", user_ref(member.0), false)
                .field("Role", role_ref(role.0), false),
        );

        Ok(())
    }
}
