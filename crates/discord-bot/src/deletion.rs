//! Delayed, cancellable ticket channel deletion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serenity::model::id::ChannelId;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::platform::GuildPlatform;

struct PendingDeletion {
    generation: u64,
    handle: AbortHandle,
}

/// One pending deletion timer per channel.
///
/// Scheduling a channel that already has a timer replaces it, so a channel
/// is deleted at most once per close.
pub struct DeletionScheduler {
    platform: Arc<dyn GuildPlatform>,
    pending: Arc<Mutex<HashMap<ChannelId, PendingDeletion>>>,
    generation: AtomicU64,
}

impl DeletionScheduler {
    pub fn new(platform: Arc<dyn GuildPlatform>) -> Self {
        Self {
            platform,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Delete `channel` after `delay` unless cancelled first.
    pub async fn schedule(&self, channel: ChannelId, delay: Duration, reason: String) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let platform = self.platform.clone();
        let pending = self.pending.clone();

        let mut timers = self.pending.lock().await;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match platform.delete_channel(channel, &reason).await {
                Ok(()) => info!(channel = channel.0, "Ticket channel deleted"),
                Err(err) => warn!(channel = channel.0, "Failed to delete ticket channel: {:#}", err),
            }

            let mut timers = pending.lock().await;
            if timers.get(&channel).is_some_and(|p| p.generation == generation) {
                timers.remove(&channel);
            }
        });

        let replaced = timers.insert(
            channel,
            PendingDeletion {
                generation,
                handle: task.abort_handle(),
            },
        );
        if let Some(previous) = replaced {
            previous.handle.abort();
        }
    }

    /// Cancel a pending deletion. Returns whether one was pending.
    pub async fn cancel(&self, channel: ChannelId) -> bool {
        match self.pending.lock().await.remove(&channel) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    pub async fn is_pending(&self, channel: ChannelId) -> bool {
        self.pending.lock().await.contains_key(&channel)
    }
}
