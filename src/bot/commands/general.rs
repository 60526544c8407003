//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require registry access
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't touch the guild.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays the command list as an embed.
    #[poise::command(slash_command, prefix_command)]
    pub async fn commands(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let embed = serenity::CreateEmbed::default()
            .title("RPG Assistant's Command List")
            .description("Here are all the commands available for RPG Assistant.")
            .colour(serenity::Colour::DARK_RED)
            .field(
                "♦ R!create_campaign \"<Campaign Name>\"",
                "Creates a new campaign category for your campaign, complete with \
                 Player and DM roles as well as all necessary channels.",
                false,
            )
            .field(
                "♦ R!delete_campaign \"<Campaign Name>\"",
                "Deletes a given campaign category, all of its channels, as well as \
                 the Player and DM roles.",
                false,
            )
            .field(
                "♦ R!rename_campaign \"<Campaign Name>\" \"<New Name>\"",
                "Renames the given campaign category and its Player and DM roles accordingly.",
                false,
            )
            .field(
                "♦ R!add_player \"<Campaign Name>\" <DiscordUser#Number>",
                "Adds a player to your campaign, creating their log channel as well. \
                 Will add more players if you input more <DiscordUser#Number> values.",
                false,
            )
            .field(
                "♦ R!remove_player \"<Campaign Name>\" <DiscordUser#Number>",
                "Removes a player from your campaign, deleting their log channel as well. \
                 Will remove more players if you input more <DiscordUser#Number> values.",
                false,
            )
            .field(
                "♦ R!set_role_colour @<role> <hex_code>",
                "Sets the mentioned role's colour to <hex_code>, be sure to leave out \
                 the leading # before the hex code!",
                false,
            )
            .field(
                "♦ R!notify_role @<role> <message>",
                "Sends your message as a direct message to every member holding the role.",
                false,
            )
            .field("♦ R!commands", "Displays this useful message!", false)
            .footer(serenity::CreateEmbedFooter::new("And more to come."));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
