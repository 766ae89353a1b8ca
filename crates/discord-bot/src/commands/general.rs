use serenity::builder::CreateApplicationCommand;

pub fn commands() -> Vec<CreateApplicationCommand> {
    vec![ping_command(), join_command(), leave_command()]
}

fn ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Show the bot's latency")
        .to_owned()
}

fn join_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("join")
        .description("Bring the bot into your voice channel")
        .dm_permission(false)
        .to_owned()
}

fn leave_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("leave")
        .description("Make the bot leave voice")
        .dm_permission(false)
        .to_owned()
}
