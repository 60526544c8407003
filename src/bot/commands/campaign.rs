//! Campaign lifecycle Discord commands - create, delete, and rename.
//!
//! These commands gate on the invoker's role name, then drive the core
//! lifecycle manager against a per-invocation guild handle. Outcomes come
//! back as chat messages; deletion confirms by DM because the invoking
//! channel may no longer exist.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_host, report, require_role_named},
        },
        core::{campaign, roles},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Creates a campaign category with its Player and Dungeon Master roles
    ///
    /// and the full channel set, then promotes the invoker to Dungeon Master.
    ///
    /// Requires the invoker to hold the server-wide "Dungeon Master" role.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn create_campaign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name for the new campaign"] name: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, "Dungeon Master").await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        ctx.say(format!(
            "⏳ Creating **{name}** for {}. Please wait until an error or success message is returned.",
            ctx.author().name
        ))
        .await?;

        let host = guild_host(&ctx, guild_id);
        let result = campaign::create_campaign(
            &host,
            &ctx.data().database,
            guild_id,
            &ctx.data().template,
            &name,
            ctx.author().id,
        )
        .await
        .map(|row| format!("✅ The campaign **{}** was successfully created!", row.name));
        report(&ctx, result).await
    }

    /// Deletes a campaign: every channel under its category, the category,
    ///
    /// both roles, and the registry entry.
    ///
    /// Requires the campaign's own Dungeon Master role.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn delete_campaign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the campaign to delete"] name: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, &roles::dungeon_master_role_name(&name)).await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        ctx.say(format!(
            "⏳ Attempting to delete **{name}**. Please wait until an error or success message is returned."
        ))
        .await?;

        let host = guild_host(&ctx, guild_id);
        match campaign::delete_campaign(&host, &ctx.data().database, guild_id, &name).await {
            Ok(()) => {
                // The invoking channel may have been deleted along with the
                // campaign, so the confirmation goes out as a DM.
                let dm = serenity::CreateMessage::new()
                    .content(format!("✅ Campaign **{name}** deleted successfully!"));
                if let Err(e) = ctx
                    .author()
                    .direct_message(&ctx.serenity_context().http, dm)
                    .await
                {
                    tracing::warn!("Could not DM the deletion confirmation: {e}");
                }
                Ok(())
            }
            Err(e) => report(&ctx, Err(e)).await,
        }
    }

    /// Renames a campaign's category and both of its roles, keeping the
    /// three names in lockstep.
    ///
    /// Requires the campaign's own Dungeon Master role.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn rename_campaign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Current campaign name"] name: String,
        #[description = "New campaign name"] new_name: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, &roles::dungeon_master_role_name(&name)).await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        ctx.say(format!(
            "⏳ Attempting to rename **{name}** into **{new_name}**, please wait until an error or success message is returned."
        ))
        .await?;

        let host = guild_host(&ctx, guild_id);
        let result = campaign::rename_campaign(
            &host,
            &ctx.data().database,
            guild_id,
            &name,
            &new_name,
        )
        .await
        .map(|row| format!("✅ **{name}** was successfully renamed to **{}**.", row.name));
        report(&ctx, result).await
    }
}

// Re-export all commands
pub use inner::*;
