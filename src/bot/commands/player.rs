//! Player membership Discord commands - add and remove campaign players.
//!
//! Both commands accept several `NAME#NUMBER` tags at once and process them
//! independently: each player gets their own outcome message and one
//! failure never aborts the rest of the list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_host, require_role_named},
        },
        core::{player, roles},
        errors::{Error, Result},
    };

    /// Adds one or more players to a campaign, creating a private log
    ///
    /// channel and granting the Player role for each of them.
    ///
    /// Requires the campaign's own Dungeon Master role.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn add_player(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The campaign to add players to"] campaign: String,
        #[description = "One or more players as NAME#NUMBER"]
        #[rest]
        players: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, &roles::dungeon_master_role_name(&campaign)).await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let tags: Vec<&str> = players.split_whitespace().collect();
        if tags.is_empty() {
            ctx.say("❌ Provide at least one player as NAME#NUMBER.")
                .await?;
            return Ok(());
        }

        let host = guild_host(&ctx, guild_id);
        for tag in tags {
            // One player failing must not stop the rest of the list.
            match player::add_player(&host, &ctx.data().database, guild_id, &campaign, tag).await
            {
                Ok(entry) => {
                    ctx.say(format!(
                        "✅ Player `{}` added to **{campaign}** successfully!",
                        entry.user_tag
                    ))
                    .await?;
                }
                Err(e) => match e.user_message() {
                    Some(message) => {
                        ctx.say(message).await?;
                    }
                    None => {
                        tracing::error!("Failed to add player {tag}: {e}");
                        ctx.say(format!(
                            "❌ An unexpected error occurred while adding `{tag}`."
                        ))
                        .await?;
                    }
                },
            }
        }
        Ok(())
    }

    /// Removes one or more players from a campaign, deleting their log
    ///
    /// channels and revoking the Player role for each of them.
    ///
    /// Requires the campaign's own Dungeon Master role.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn remove_player(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The campaign to remove players from"] campaign: String,
        #[description = "One or more players as NAME#NUMBER"]
        #[rest]
        players: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, &roles::dungeon_master_role_name(&campaign)).await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let tags: Vec<&str> = players.split_whitespace().collect();
        if tags.is_empty() {
            ctx.say("❌ Provide at least one player as NAME#NUMBER.")
                .await?;
            return Ok(());
        }

        let host = guild_host(&ctx, guild_id);
        for tag in tags {
            match player::remove_player(&host, &ctx.data().database, guild_id, &campaign, tag)
                .await
            {
                Ok(()) => {
                    ctx.say(format!(
                        "✅ Player `{tag}` successfully removed from **{campaign}**."
                    ))
                    .await?;
                }
                Err(e) => match e.user_message() {
                    Some(message) => {
                        ctx.say(message).await?;
                    }
                    None => {
                        tracing::error!("Failed to remove player {tag}: {e}");
                        ctx.say(format!(
                            "❌ An unexpected error occurred while removing `{tag}`."
                        ))
                        .await?;
                    }
                },
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
