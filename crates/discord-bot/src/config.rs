use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Channel that receives every audit log event.
pub const LOG_CHANNEL_ID: u64 = 1462333582168297533;
/// Category new ticket channels are created under.
pub const TICKET_CATEGORY_ID: u64 = 1459655075134968033;
/// Role that staffs tickets.
pub const SUPPORT_ROLE_ID: u64 = 1459657415657001215;
/// Seconds between an authorized close and the channel deletion.
pub const DEFAULT_CLOSE_DELAY_SECS: u64 = 3;

/// Configuration for the Discord bot.
///
/// The guild wiring (log channel, ticket category, support role) defaults to
/// fixed identifiers and may be overridden from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Guild to register commands in for instant availability
    pub guild_id: Option<u64>,
    /// Role granted to new members when the process starts
    pub autorole_id: Option<u64>,
    pub log_channel_id: u64,
    pub ticket_category_id: u64,
    pub support_role_id: u64,
    pub ticket_close_delay_secs: u64,
}

fn optional_id(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .wrap_err_with(|| format!("{} must be a valid u64", name)),
        _ => Ok(None),
    }
}

impl BotConfig {
    /// Configuration with the built-in guild wiring and no optional values.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            guild_id: None,
            autorole_id: None,
            log_channel_id: LOG_CHANNEL_ID,
            ticket_category_id: TICKET_CATEGORY_ID,
            support_role_id: SUPPORT_ROLE_ID,
            ticket_close_delay_secs: DEFAULT_CLOSE_DELAY_SECS,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN").unwrap_or_default().trim().to_string();
        if token.is_empty() {
            return Err(eyre!("DISCORD_TOKEN environment variable not set or empty"));
        }

        let mut config = Self::with_token(token);
        config.guild_id = optional_id("GUILD_ID")?;
        config.autorole_id = optional_id("AUTOROLE_ID")?;

        if let Some(id) = optional_id("LOG_CHANNEL_ID")? {
            config.log_channel_id = id;
        }
        if let Some(id) = optional_id("TICKET_CATEGORY_ID")? {
            config.ticket_category_id = id;
        }
        if let Some(id) = optional_id("SUPPORT_ROLE_ID")? {
            config.support_role_id = id;
        }
        if let Some(secs) = optional_id("TICKET_CLOSE_DELAY_SECS")? {
            config.ticket_close_delay_secs = secs;
        }

        Ok(config)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_secs(self.ticket_close_delay_secs)
    }
}
