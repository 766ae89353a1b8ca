//! Voice presence. The bot joins and leaves voice channels through the
//! gateway; it does not stream audio.

use eyre::eyre;
use serenity::{
    client::Context,
    model::id::{ChannelId, GuildId, UserId},
};
use tracing::info;
use warden_core::errors::{WardenError, WardenResult};

/// Join the voice channel `user` is currently in.
pub async fn join(ctx: &Context, guild: GuildId, user: UserId) -> WardenResult<ChannelId> {
    let channel = ctx
        .cache
        .guild(guild)
        .and_then(|guild| guild.voice_states.get(&user).and_then(|state| state.channel_id))
        .ok_or_else(|| WardenError::Validation("Join a voice channel first.".to_string()))?;

    let manager = songbird::get(ctx)
        .await
        .ok_or_else(|| eyre!("Songbird voice client was not registered"))?;

    let (_call, joined) = manager.join_gateway(guild, channel).await;
    joined.map_err(|err| eyre!("Failed to join voice channel {}: {}", channel, err))?;

    info!(guild = guild.0, channel = channel.0, "Joined voice channel");
    Ok(channel)
}

/// Leave voice in `guild`. Returns `false` when the bot was not connected.
pub async fn leave(ctx: &Context, guild: GuildId) -> WardenResult<bool> {
    let manager = songbird::get(ctx)
        .await
        .ok_or_else(|| eyre!("Songbird voice client was not registered"))?;

    if manager.get(guild).is_none() {
        return Ok(false);
    }

    manager
        .remove(guild)
        .await
        .map_err(|err| eyre!("Failed to leave voice: {}", err))?;

    info!(guild = guild.0, "Left voice channel");
    Ok(true)
}
