//! Moderation slash commands: /ban, /kick, /timeout, /untimeout, /clear, /role, /warn

use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::model::application::command::CommandOptionType;
use serenity::model::Permissions;
use warden_core::models::validation::{CLEAR_COUNT, REASON_LIMIT, TIMEOUT_MINUTES};

pub fn commands() -> Vec<CreateApplicationCommand> {
    vec![
        ban_command(),
        kick_command(),
        timeout_command(),
        untimeout_command(),
        clear_command(),
        role_command(),
        warn_command(),
    ]
}

fn user_option(option: &mut CreateApplicationCommandOption) -> &mut CreateApplicationCommandOption {
    option
        .name("user")
        .description("Target member")
        .kind(CommandOptionType::User)
        .required(true)
}

fn reason_option(
    option: &mut CreateApplicationCommandOption,
    required: bool,
) -> &mut CreateApplicationCommandOption {
    option
        .name("reason")
        .description("Reason")
        .kind(CommandOptionType::String)
        .max_length(REASON_LIMIT as u16)
        .required(required)
}

fn ban_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ban")
        .description("Ban a member")
        .default_member_permissions(Permissions::BAN_MEMBERS)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| reason_option(option, false))
        .to_owned()
}

fn kick_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("kick")
        .description("Kick a member")
        .default_member_permissions(Permissions::KICK_MEMBERS)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| reason_option(option, false))
        .to_owned()
}

fn timeout_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("timeout")
        .description("Time a member out")
        .default_member_permissions(Permissions::MODERATE_MEMBERS)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| {
            option
                .name("minutes")
                .description("1-10080")
                .kind(CommandOptionType::Integer)
                .min_int_value(*TIMEOUT_MINUTES.start())
                .max_int_value(*TIMEOUT_MINUTES.end())
                .required(true)
        })
        .create_option(|option| reason_option(option, false))
        .to_owned()
}

fn untimeout_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("untimeout")
        .description("Lift a member's timeout")
        .default_member_permissions(Permissions::MODERATE_MEMBERS)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| reason_option(option, false))
        .to_owned()
}

fn clear_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("clear")
        .description("Delete recent messages")
        .default_member_permissions(Permissions::MANAGE_MESSAGES)
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("count")
                .description("1-100")
                .kind(CommandOptionType::Integer)
                .min_int_value(*CLEAR_COUNT.start())
                .max_int_value(*CLEAR_COUNT.end())
                .required(true)
        })
        .to_owned()
}

fn role_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("role")
        .description("Give or take a role")
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| {
            option
                .name("role")
                .description("Role")
                .kind(CommandOptionType::Role)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("action")
                .description("add/remove")
                .kind(CommandOptionType::String)
                .required(true)
                .add_string_choice("add", "add")
                .add_string_choice("remove", "remove")
        })
        .to_owned()
}

fn warn_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("warn")
        .description("Warn a member")
        .default_member_permissions(Permissions::MODERATE_MEMBERS)
        .dm_permission(false)
        .create_option(user_option)
        .create_option(|option| reason_option(option, true))
        .to_owned()
}
