//! Slash command dispatch.

use std::sync::Arc;
use std::time::Instant;

use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use tracing::{error, info};
use warden_core::{
    errors::{WardenError, WardenResult, GENERIC_FAILURE},
    models::{
        audit::{channel_ref, LogEvent},
        validation::{AutoroleAction, RoleAction, TicketAction},
    },
};

use super::{options, HandlerContext};
use crate::{
    invocation::Invocation,
    responder::{finish, InteractionResponder, Responder},
    voice,
};

/// Run one slash command to completion.
///
/// The command runs in its own task so that even a panic inside a handler
/// is answered with a generic failure instead of leaving the user hanging.
pub async fn run_command(handler_ctx: HandlerContext, command: ApplicationCommandInteraction) {
    let name = command.data.name.clone();
    info!("Received command: {}", name);

    let responder = Arc::new(InteractionResponder::new(
        handler_ctx.ctx.http.clone(),
        command.clone(),
    ));
    let task_responder = responder.clone();

    let outcome = tokio::spawn(async move {
        let result = dispatch(&handler_ctx, &command, task_responder.as_ref()).await;
        finish(task_responder.as_ref(), &command.data.name, result).await;
    })
    .await;

    if let Err(join_error) = outcome {
        error!(command = %name, "Command handler aborted: {:?}", join_error);
        if let Err(why) = responder.respond(GENERIC_FAILURE).await {
            error!("Failed to send error response: {:?}", why);
        }
    }
}

async fn dispatch(
    handler_ctx: &HandlerContext,
    command: &ApplicationCommandInteraction,
    responder: &dyn Responder,
) -> WardenResult<()> {
    let services = &handler_ctx.services;
    let invocation = Invocation::from_command(command);
    let opts = command.data.options.as_slice();

    match command.data.name.as_str() {
        "ping" => ping(responder).await,
        "join" => join(handler_ctx, &invocation, responder).await,
        "leave" => leave(handler_ctx, &invocation, responder).await,
        "ban" => {
            let target = options::user(opts, "user")?;
            let reason = options::string(opts, "reason");
            services
                .moderation
                .ban(&invocation, &target, reason.as_deref(), responder)
                .await
        }
        "kick" => {
            let target = options::user(opts, "user")?;
            let reason = options::string(opts, "reason");
            services
                .moderation
                .kick(&invocation, &target, reason.as_deref(), responder)
                .await
        }
        "timeout" => {
            let target = options::user(opts, "user")?;
            let minutes = options::integer(opts, "minutes")?;
            let reason = options::string(opts, "reason");
            services
                .moderation
                .timeout(&invocation, &target, minutes, reason.as_deref(), responder)
                .await
        }
        "untimeout" => {
            let target = options::user(opts, "user")?;
            let reason = options::string(opts, "reason");
            services
                .moderation
                .untimeout(&invocation, &target, reason.as_deref(), responder)
                .await
        }
        "clear" => {
            let count = options::integer(opts, "count")?;
            services.moderation.clear(&invocation, count, responder).await
        }
        "role" => {
            let target = options::user(opts, "user")?;
            let role = options::role(opts, "role")
                .ok_or_else(|| WardenError::Validation("Missing option `role`.".to_string()))?;
            let action: RoleAction = options::required_string(opts, "action")?.parse()?;
            services
                .moderation
                .role(&invocation, &target, &role, action, responder)
                .await
        }
        "warn" => {
            let target = options::user(opts, "user")?;
            let reason = options::required_string(opts, "reason")?;
            services
                .moderation
                .warn(&invocation, &target, &reason, responder)
                .await
        }
        "slowmode" => {
            let channel = options::channel(opts, "channel")?;
            let seconds = options::integer(opts, "seconds")?;
            services
                .moderation
                .slowmode(&invocation, channel, seconds, responder)
                .await
        }
        "autorole" => {
            let action: AutoroleAction = options::required_string(opts, "action")?.parse()?;
            match action {
                AutoroleAction::Set => {
                    let role = options::role(opts, "role");
                    services
                        .autorole
                        .set(&invocation, role.as_ref(), responder)
                        .await
                }
                AutoroleAction::Disable => services.autorole.disable(&invocation, responder).await,
                AutoroleAction::Show => services.autorole.show(&invocation, responder).await,
            }
        }
        "ticket" => {
            let action: TicketAction = options::required_string(opts, "action")?.parse()?;
            match action {
                TicketAction::Create => {
                    let reason = options::string(opts, "reason");
                    services
                        .tickets
                        .create(&invocation, reason.as_deref(), responder)
                        .await
                }
                TicketAction::Close => services.tickets.close(&invocation, responder).await,
            }
        }
        other => Err(WardenError::Validation(format!("Unknown command `{}`.", other))),
    }
}

async fn ping(responder: &dyn Responder) -> WardenResult<()> {
    let started = Instant::now();
    responder.defer().await?;
    let latency = started.elapsed().as_millis();

    responder.respond(&format!("🏓 {}ms", latency)).await?;
    Ok(())
}

async fn join(
    handler_ctx: &HandlerContext,
    invocation: &Invocation,
    responder: &dyn Responder,
) -> WardenResult<()> {
    let guild = invocation.guild()?;
    responder.defer().await?;

    let channel = voice::join(&handler_ctx.ctx, guild, invocation.actor.id).await?;

    handler_ctx.services.audit.log(
        LogEvent::new("🎧 JOIN")
            .field("Voice channel", channel_ref(channel.0), false)
            .with_actor(invocation.audit_context()),
    );
    responder
        .respond(&format!("✅ Joined <#{}>.", channel.0))
        .await?;

    Ok(())
}

async fn leave(
    handler_ctx: &HandlerContext,
    invocation: &Invocation,
    responder: &dyn Responder,
) -> WardenResult<()> {
    let guild = invocation.guild()?;

    if !voice::leave(&handler_ctx.ctx, guild).await? {
        return Err(WardenError::Validation("I'm not in a voice channel.".to_string()));
    }

    handler_ctx
        .services
        .audit
        .log(LogEvent::new("🎧 LEAVE").with_actor(invocation.audit_context()));
    responder.respond("✅ Left voice.").await?;

    Ok(())
}
