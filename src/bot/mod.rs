//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the RpgAssistant
//! application: the shared command context, the framework setup, and the
//! top-level error handler. Commands are registered both as slash commands
//! and as `R!` prefix commands.

/// Discord command implementations (campaign, player, role, general)
pub mod commands;

use crate::config::channels::ChannelSpec;
use crate::errors::Error;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Shared data available to all bot commands.
/// Holds the registry connection and the campaign channel template; the
/// platform handle itself is constructed per invocation, not stored here.
pub struct BotData {
    /// Registry connection for all database operations
    pub database: DatabaseConnection,
    /// The channel set every new campaign is created with
    pub template: Vec<ChannelSpec>,
}

impl BotData {
    /// Creates a new `BotData` instance for the framework setup hook.
    #[must_use]
    pub const fn new(database: DatabaseConnection, template: Vec<ChannelSpec>) -> Self {
        Self { database, template }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the bot until it disconnects.
pub async fn run_bot(
    token: String,
    database: DatabaseConnection,
    template: Vec<ChannelSpec>,
) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::create_campaign(),
                commands::delete_campaign(),
                commands::rename_campaign(),
                commands::add_player(),
                commands::remove_player(),
                commands::set_role_colour(),
                commands::notify_role(),
                commands::commands(),
                commands::ping(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("R!".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, template))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {e:?}"))?;

    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {e:?}"))
}
