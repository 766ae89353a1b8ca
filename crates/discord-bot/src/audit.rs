use std::sync::Arc;
use std::time::Duration;

use eyre::{eyre, Result};
use serenity::model::id::ChannelId;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, warn};
use warden_core::models::audit::LogEvent;

use crate::platform::GuildPlatform;

/// Upper bound on a single delivery before the worker moves on.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

enum Job {
    Deliver(LogEvent),
    Flush(oneshot::Sender<()>),
}

/// Best-effort writer for the audit log channel.
///
/// Events are queued and posted by a background worker in the order they
/// were logged, so a command never waits on the log channel before it
/// replies. A failed delivery never reaches the caller; the event is kept
/// in the process log instead.
#[derive(Clone)]
pub struct AuditLogger {
    queue: mpsc::UnboundedSender<Job>,
}

impl AuditLogger {
    /// Start the delivery worker. Must be called inside a tokio runtime.
    pub fn new(platform: Arc<dyn GuildPlatform>, destination: ChannelId) -> Self {
        let (queue, jobs) = mpsc::unbounded_channel();
        tokio::spawn(deliver_all(platform, destination, jobs));

        Self { queue }
    }

    /// Queue `event` for delivery and return immediately.
    pub fn log(&self, event: LogEvent) {
        if let Err(mpsc::error::SendError(Job::Deliver(event))) = self.queue.send(Job::Deliver(event)) {
            dropped(&event, "audit worker stopped");
        }
    }

    /// Wait until every event queued before this call has been handled.
    pub async fn flush(&self) -> Result<()> {
        let (done, finished) = oneshot::channel();
        self.queue
            .send(Job::Flush(done))
            .map_err(|_| eyre!("audit worker stopped"))?;
        finished.await.map_err(|_| eyre!("audit worker stopped"))
    }
}

async fn deliver_all(
    platform: Arc<dyn GuildPlatform>,
    destination: ChannelId,
    mut jobs: mpsc::UnboundedReceiver<Job>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            Job::Deliver(event) => {
                let delivery = timeout(DELIVERY_TIMEOUT, platform.send_log(destination, &event)).await;

                match delivery {
                    Ok(Ok(())) => debug!(title = %event.title, "Audit event delivered"),
                    Ok(Err(err)) => dropped(&event, &format!("{:#}", err)),
                    Err(_) => dropped(&event, "timed out"),
                }
            }
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

fn dropped(event: &LogEvent, cause: &str) {
    let record = serde_json::to_string(event).unwrap_or_else(|_| event.title.clone());
    warn!(cause, event = %record, "Audit event not delivered");
}
