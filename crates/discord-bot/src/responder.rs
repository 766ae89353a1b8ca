//! Answering the user who ran a command.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eyre::Result;
use serenity::{
    http::Http,
    model::application::interaction::{
        application_command::ApplicationCommandInteraction, InteractionResponseType,
    },
};
use tracing::{error, info};
use warden_core::errors::WardenResult;

#[async_trait]
pub trait Responder: Send + Sync {
    /// Acknowledge now and answer later. Required before slow work.
    async fn defer(&self) -> Result<()>;

    /// Send `content` to the invoker, ephemerally where possible.
    async fn respond(&self, content: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseState {
    Pending,
    Deferred,
    Replied,
}

/// [`Responder`] for a serenity slash command interaction.
///
/// Picks the right call for the interaction's state: an initial reply, an
/// edit of the deferred reply, or a follow-up once a reply exists.
pub struct InteractionResponder {
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
    state: Mutex<ResponseState>,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, command: ApplicationCommandInteraction) -> Self {
        Self {
            http,
            command,
            state: Mutex::new(ResponseState::Pending),
        }
    }

    fn state(&self) -> ResponseState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: ResponseState) {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn defer(&self) -> Result<()> {
        if self.state() != ResponseState::Pending {
            return Ok(());
        }

        self.command
            .create_interaction_response(&self.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|d| d.ephemeral(true))
            })
            .await?;
        self.set_state(ResponseState::Deferred);

        Ok(())
    }

    async fn respond(&self, content: &str) -> Result<()> {
        match self.state() {
            ResponseState::Pending => {
                self.command
                    .create_interaction_response(&self.http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| m.content(content).ephemeral(true))
                    })
                    .await?;
                self.set_state(ResponseState::Replied);
            }
            ResponseState::Deferred => {
                self.command
                    .edit_original_interaction_response(&self.http, |r| r.content(content))
                    .await?;
                self.set_state(ResponseState::Replied);
            }
            ResponseState::Replied => {
                self.command
                    .create_followup_message(&self.http, |f| f.content(content).ephemeral(true))
                    .await?;
            }
        }

        Ok(())
    }
}

/// Turn a command's outcome into the user-visible answer.
///
/// Successful commands have already responded. Failures get their short
/// message; internal ones are logged with full detail first.
pub async fn finish(responder: &dyn Responder, command: &str, result: WardenResult<()>) {
    let Err(err) = result else {
        return;
    };

    if err.is_internal() {
        error!(command, "Command failed: {:?}", err);
    } else {
        info!(command, "Command rejected: {}", err);
    }

    if let Err(why) = responder.respond(&err.user_message()).await {
        error!(command, "Failed to send error response: {:?}", why);
    }
}
