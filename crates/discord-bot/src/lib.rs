//! Discord side of warden: slash commands, gateway events and the
//! controllers behind them.

use std::sync::Arc;

use eyre::{Result, WrapErr};
use serenity::{http::Http, prelude::GatewayIntents, Client};
use songbird::SerenityInit;
use tracing::info;

pub mod audit;
pub mod autorole;
pub mod commands;
pub mod config;
pub mod deletion;
pub mod handlers;
pub mod invocation;
pub mod moderation;
pub mod platform;
pub mod responder;
pub mod tickets;
pub mod voice;

use platform::discord::SerenityPlatform;

/// Messages kept per channel so deletions can still be logged with content.
const CACHED_MESSAGES_PER_CHANNEL: usize = 500;

/// Start the Discord bot with the provided configuration.
///
/// Runs until the gateway connection ends or an error occurs.
pub async fn start_bot(config: config::BotConfig) -> Result<()> {
    info!("Starting Discord bot");

    // The controllers need the bot's own id before the gateway is up.
    let http = Arc::new(Http::new(&config.token));
    let bot = http
        .get_current_user()
        .await
        .wrap_err("Failed to fetch the bot user; is DISCORD_TOKEN valid?")?;
    info!("Authenticated as {}", bot.tag());

    let platform = Arc::new(SerenityPlatform::new(http, bot.id));
    let services = Arc::new(handlers::Services::new(platform, &config));
    let handler = handlers::Handler::new(config.clone(), services);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .cache_settings(|settings| settings.max_messages(CACHED_MESSAGES_PER_CHANNEL))
        .register_songbird()
        .await?;

    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
