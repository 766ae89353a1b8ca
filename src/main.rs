use color_eyre::{config::HookBuilder, eyre::Result};
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use warden_api::config::ApiConfig;
use warden_discord_bot::config::BotConfig;

/// Install color-eyre and route panics through tracing before the default report.
fn install_fault_handlers() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default().into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Unhandled panic: {}", panic_info);
        panic_hook(panic_info);
    }));

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    install_fault_handlers()?;

    // Neither task takes the process down with it when it stops.
    let api_config = ApiConfig::from_env_or_default();
    tokio::spawn(async move {
        if let Err(err) = warden_api::start_server(api_config).await {
            error!("Health server stopped: {:?}", err);
        }
    });

    match BotConfig::from_env() {
        Ok(bot_config) => {
            tokio::spawn(async move {
                if let Err(err) = warden_discord_bot::start_bot(bot_config).await {
                    error!("Discord bot stopped: {:?}", err);
                }
            });
        }
        Err(err) => warn!("Discord bot not started: {}", err),
    }

    info!("Warden is running");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
