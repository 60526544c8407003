//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Campaign lifecycle commands
pub mod campaign;

/// General utility commands
pub mod general;

/// Player membership commands
pub mod player;

/// Role utility commands
pub mod role;

// Export commands
pub use campaign::*;
pub use general::*;
pub use player::*;
pub use role::*;

use crate::{
    bot::BotData,
    errors::{Error, Result},
    platform::DiscordGuild,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Checks the invoker against a required role name, replying with a
/// permission-denied message when they do not hold it.
///
/// Campaign gates are name-derived ("`<name>` Dungeon Master"), so this has
/// to happen per invocation rather than through a static command check.
pub(crate) async fn require_role_named(
    ctx: &poise::Context<'_, BotData, Error>,
    role_name: &str,
) -> Result<bool> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("❌ This command only works inside a server.")
            .await?;
        return Ok(false);
    };
    let Some(member) = ctx.author_member().await else {
        ctx.say("❌ Could not resolve your server membership.")
            .await?;
        return Ok(false);
    };

    let roles = guild_id.roles(&ctx.serenity_context().http).await?;
    let held = member
        .roles
        .iter()
        .any(|id| roles.get(id).is_some_and(|r| r.name == role_name));
    if !held {
        ctx.say(format!(
            "❌ You do not have the **{role_name}** role required for this command."
        ))
        .await?;
    }
    Ok(held)
}

/// Builds the per-invocation platform handle for the invoking guild.
pub(crate) fn guild_host(
    ctx: &poise::Context<'_, BotData, Error>,
    guild_id: serenity::GuildId,
) -> DiscordGuild {
    DiscordGuild::new(Arc::clone(&ctx.serenity_context().http), guild_id)
}

/// Replies with the outcome of a core operation.
///
/// User-addressable errors become chat messages; internal errors propagate
/// to the framework error handler.
pub(crate) async fn report(
    ctx: &poise::Context<'_, BotData, Error>,
    result: Result<String>,
) -> Result<()> {
    match result {
        Ok(message) => {
            ctx.say(message).await?;
        }
        Err(e) => match e.user_message() {
            Some(message) => {
                ctx.say(message).await?;
            }
            None => return Err(e),
        },
    }
    Ok(())
}
