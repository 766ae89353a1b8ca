use serenity::builder::{CreateApplicationCommand, CreateApplicationCommands};

pub mod general;
pub mod moderation;
pub mod server;

/// Every slash command the bot exposes.
pub fn all_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = general::commands();
    commands.extend(moderation::commands());
    commands.extend(server::commands());
    commands
}

/// Register all commands for the bot.
///
/// # Arguments
///
/// * `commands` - A mutable reference to a CreateApplicationCommands object
///                that will be modified to include our commands.
///
/// # Returns
///
/// The same CreateApplicationCommands object with our commands added.
pub fn register_commands(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    commands.set_application_commands(all_commands())
}
