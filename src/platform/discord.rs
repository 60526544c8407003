//! Live Discord implementation of [`GuildHost`].
//!
//! A `DiscordGuild` is a dependency-injected handle: an `Arc<Http>` plus the
//! guild it operates on, built fresh for each command invocation. Unknown
//! channel/role responses from Discord are translated into the typed
//! `ChannelGone`/`RoleGone` errors so the lifecycle manager can treat
//! already-deleted objects as non-fatal during teardown.

use crate::{
    errors::{Error, Result},
    platform::{ChannelKind, ChannelSummary, GuildHost, MemberProfile},
};
use poise::serenity_prelude as serenity;
use serenity::{
    ChannelId, ChannelType, Colour, CreateChannel, EditChannel, EditRole, GuildId, Http,
    PermissionOverwrite, Permissions, RoleId, UserId,
};
use std::sync::Arc;

// Discord JSON error codes for requests against deleted objects.
const UNKNOWN_CHANNEL: isize = 10003;
const UNKNOWN_ROLE: isize = 10011;

/// A handle on one guild of one Discord connection.
pub struct DiscordGuild {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordGuild {
    /// Creates a handle for `guild_id` using the given HTTP client.
    #[must_use]
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

/// Extracts the Discord JSON error code from an unsuccessful request, if any.
fn discord_json_code(err: &serenity::Error) -> Option<isize> {
    if let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = err {
        Some(response.error.code)
    } else {
        None
    }
}

fn discriminator_matches(user: &serenity::User, discriminator: &str) -> bool {
    match user.discriminator {
        Some(d) => discriminator.parse::<u16>().is_ok_and(|v| v == d.get()),
        // Accounts migrated off the discriminator system show up as #0.
        None => discriminator == "0",
    }
}

impl GuildHost for DiscordGuild {
    fn everyone_role(&self) -> RoleId {
        // The @everyone role shares the guild's snowflake.
        RoleId::new(self.guild_id.get())
    }

    async fn create_category(
        &self,
        name: &str,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId> {
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Category)
            .permissions(overwrites);
        let category = self.guild_id.create_channel(&self.http, builder).await?;
        Ok(category.id)
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId> {
        let channel_type = match kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };
        let builder = CreateChannel::new(name)
            .kind(channel_type)
            .category(parent)
            .permissions(overwrites);
        let channel = self.guild_id.create_channel(&self.http, builder).await?;
        Ok(channel.id)
    }

    async fn rename_channel(&self, channel: ChannelId, name: &str) -> Result<()> {
        channel
            .edit(&self.http, EditChannel::new().name(name))
            .await?;
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> Result<()> {
        match channel.delete(&self.http).await {
            Ok(_) => Ok(()),
            Err(e) if discord_json_code(&e) == Some(UNKNOWN_CHANNEL) => Err(Error::ChannelGone {
                id: channel.get(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn channels_in_category(&self, parent: ChannelId) -> Result<Vec<ChannelSummary>> {
        let channels = self.guild_id.channels(&self.http).await?;
        Ok(channels
            .into_values()
            .filter(|c| c.parent_id == Some(parent))
            .filter_map(|c| {
                let kind = match c.kind {
                    ChannelType::Text => ChannelKind::Text,
                    ChannelType::Voice => ChannelKind::Voice,
                    _ => return None,
                };
                Some(ChannelSummary {
                    id: c.id,
                    name: c.name,
                    kind,
                })
            })
            .collect())
    }

    async fn create_role(&self, name: &str, permissions: Permissions) -> Result<RoleId> {
        let role = self
            .guild_id
            .create_role(&self.http, EditRole::new().name(name).permissions(permissions))
            .await?;
        Ok(role.id)
    }

    async fn rename_role(&self, role: RoleId, name: &str) -> Result<()> {
        self.guild_id
            .edit_role(&self.http, role, EditRole::new().name(name))
            .await?;
        Ok(())
    }

    async fn recolour_role(&self, role: RoleId, colour: Colour) -> Result<()> {
        self.guild_id
            .edit_role(&self.http, role, EditRole::new().colour(colour))
            .await?;
        Ok(())
    }

    async fn delete_role(&self, role: RoleId) -> Result<()> {
        match self.guild_id.delete_role(&self.http, role).await {
            Ok(()) => Ok(()),
            Err(e) if discord_json_code(&e) == Some(UNKNOWN_ROLE) => {
                Err(Error::RoleGone { id: role.get() })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_member(
        &self,
        username: &str,
        discriminator: &str,
    ) -> Result<Option<MemberProfile>> {
        let members = self.guild_id.members(&self.http, None, None).await?;
        Ok(members
            .into_iter()
            .find(|m| m.user.name == username && discriminator_matches(&m.user, discriminator))
            .map(|m| MemberProfile {
                user_id: m.user.id,
                username: m.user.name,
            }))
    }

    async fn member_has_role(&self, user: UserId, role: RoleId) -> Result<bool> {
        let member = self.guild_id.member(&self.http, user).await?;
        Ok(member.roles.contains(&role))
    }

    async fn add_member_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.http
            .add_member_role(self.guild_id, user, role, None)
            .await?;
        Ok(())
    }

    async fn remove_member_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.http
            .remove_member_role(self.guild_id, user, role, None)
            .await?;
        Ok(())
    }

    async fn members_with_role(&self, role: RoleId) -> Result<Vec<MemberProfile>> {
        let members = self.guild_id.members(&self.http, None, None).await?;
        Ok(members
            .into_iter()
            .filter(|m| m.roles.contains(&role))
            .map(|m| MemberProfile {
                user_id: m.user.id,
                username: m.user.name,
            })
            .collect())
    }

    async fn dm_member(&self, user: UserId, content: &str) -> Result<()> {
        let channel = user.create_dm_channel(&self.http).await?;
        channel.id.say(&self.http, content).await?;
        Ok(())
    }
}
