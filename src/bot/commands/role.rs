//! Role utility Discord commands - colour changes and role broadcasts.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_host, report, require_role_named},
        },
        core::roles,
        errors::{Error, Result},
        platform::GuildHost,
    };
    use poise::serenity_prelude as serenity;

    /// Sets a role's display colour from a bare hex code (no leading `#`).
    ///
    /// Requires the server-wide "Dungeon Master" role. Invalid codes are
    /// rejected before anything is touched.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn set_role_colour(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The role to recolour"] role: serenity::Role,
        #[description = "Hex colour code without the leading #"] colour: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, "Dungeon Master").await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let parsed = match roles::parse_colour(&colour) {
            Ok(parsed) => parsed,
            Err(e) => return report(&ctx, Err(e)).await,
        };

        let host = guild_host(&ctx, guild_id);
        host.recolour_role(role.id, parsed).await?;
        ctx.say(format!(
            "✅ The colour of **{}** is now `#{:06x}`.",
            role.name, parsed.0
        ))
        .await?;
        Ok(())
    }

    /// Sends a direct message to every member currently holding a role.
    ///
    /// Requires the server-wide "Dungeon Master" role. Members with closed
    /// DMs are skipped.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn notify_role(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The role whose members to notify"] role: serenity::Role,
        #[description = "The message to deliver"]
        #[rest]
        message: String,
    ) -> Result<()> {
        if !require_role_named(&ctx, "Dungeon Master").await? {
            return Ok(());
        }
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let host = guild_host(&ctx, guild_id);
        let delivered = roles::broadcast_to_role(&host, role.id, &message).await?;
        ctx.say(format!(
            "✅ Delivered the notice to {delivered} member(s) of **{}**.",
            role.name
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
