//! Binary entry point - wires configuration, the registry, and the bot.

use dotenvy::dotenv;
use rpg_assistant::{bot, config, errors::Result};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    let template = config::channels::load_template_or_default("config.toml")
        .inspect_err(|e| error!("Failed to load the channel template: {e}"))?;
    info!("Campaign channel template has {} channels.", template.len());

    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Registry database connection established."))
        .inspect_err(|e| error!("Failed to connect to the registry database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create registry tables: {e}"))?;

    // The token is read directly before use, not stored in configuration
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    bot::run_bot(token, db, template).await?;

    Ok(())
}
