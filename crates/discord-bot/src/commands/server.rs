//! Server management slash commands: /slowmode, /autorole, /ticket

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::channel::ChannelType;
use serenity::model::Permissions;
use warden_core::models::validation::{REASON_LIMIT, SLOWMODE_SECONDS};

pub fn commands() -> Vec<CreateApplicationCommand> {
    vec![slowmode_command(), autorole_command(), ticket_command()]
}

fn slowmode_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("slowmode")
        .description("Set a channel's slowmode")
        .default_member_permissions(Permissions::MANAGE_CHANNELS)
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("channel")
                .description("Channel")
                .kind(CommandOptionType::Channel)
                .channel_types(&[ChannelType::Text])
                .required(true)
        })
        .create_option(|option| {
            option
                .name("seconds")
                .description("0-21600")
                .kind(CommandOptionType::Integer)
                .min_int_value(*SLOWMODE_SECONDS.start())
                .max_int_value(*SLOWMODE_SECONDS.end())
                .required(true)
        })
        .to_owned()
}

fn autorole_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("autorole")
        .description("Role granted to new members")
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("action")
                .description("set/disable/show")
                .kind(CommandOptionType::String)
                .required(true)
                .add_string_choice("set", "set")
                .add_string_choice("disable", "disable")
                .add_string_choice("show", "show")
        })
        .create_option(|option| {
            option
                .name("role")
                .description("Role (for set)")
                .kind(CommandOptionType::Role)
                .required(false)
        })
        .to_owned()
}

fn ticket_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ticket")
        .description("Open or close a support ticket")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("action")
                .description("create/close")
                .kind(CommandOptionType::String)
                .required(true)
                .add_string_choice("create", "create")
                .add_string_choice("close", "close")
        })
        .create_option(|option| {
            option
                .name("reason")
                .description("Reason")
                .kind(CommandOptionType::String)
                .max_length(REASON_LIMIT as u16)
                .required(false)
        })
        .to_owned()
}
