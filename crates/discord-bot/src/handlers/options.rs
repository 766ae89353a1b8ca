//! Pulling typed values out of slash command options.

use serenity::model::{
    application::interaction::application_command::{CommandDataOption, CommandDataOptionValue},
    id::ChannelId,
};
use warden_core::errors::{WardenError, WardenResult};

use crate::moderation::{RoleRef, TargetUser};

fn find<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a CommandDataOptionValue> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.resolved.as_ref())
}

fn missing(name: &str) -> WardenError {
    WardenError::Validation(format!("Missing option `{}`.", name))
}

pub fn string(options: &[CommandDataOption], name: &str) -> Option<String> {
    match find(options, name) {
        Some(CommandDataOptionValue::String(value)) => Some(value.clone()),
        _ => None,
    }
}

pub fn required_string(options: &[CommandDataOption], name: &str) -> WardenResult<String> {
    string(options, name).ok_or_else(|| missing(name))
}

pub fn integer(options: &[CommandDataOption], name: &str) -> WardenResult<i64> {
    match find(options, name) {
        Some(CommandDataOptionValue::Integer(value)) => Ok(*value),
        _ => Err(missing(name)),
    }
}

pub fn user(options: &[CommandDataOption], name: &str) -> WardenResult<TargetUser> {
    match find(options, name) {
        Some(CommandDataOptionValue::User(user, _member)) => Ok(TargetUser {
            id: user.id,
            tag: user.tag(),
        }),
        _ => Err(missing(name)),
    }
}

pub fn role(options: &[CommandDataOption], name: &str) -> Option<RoleRef> {
    match find(options, name) {
        Some(CommandDataOptionValue::Role(role)) => Some(RoleRef {
            id: role.id,
            name: role.name.clone(),
        }),
        _ => None,
    }
}

pub fn channel(options: &[CommandDataOption], name: &str) -> WardenResult<ChannelId> {
    match find(options, name) {
        Some(CommandDataOptionValue::Channel(channel)) => Ok(channel.id),
        _ => Err(missing(name)),
    }
}
