//! Chat-platform access layer.
//!
//! All guild mutations go through the [`GuildHost`] trait instead of a
//! process-wide client singleton. The live implementation
//! ([`discord::DiscordGuild`]) wraps an HTTP handle plus a guild ID and is
//! constructed per command invocation; tests substitute an in-memory fake.

/// Live Discord implementation of [`GuildHost`]
pub mod discord;

pub use discord::DiscordGuild;

use crate::errors::Result;
use poise::serenity_prelude::{
    ChannelId, Colour, PermissionOverwrite, Permissions, RoleId, UserId,
};
use serde::Deserialize;

/// The two channel kinds a campaign uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// A text channel
    Text,
    /// A voice channel
    Voice,
}

/// A resolved guild member, reduced to what the managers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    /// The member's user ID
    pub user_id: UserId,
    /// The member's account username (not the guild nickname)
    pub username: String,
}

/// A channel listed under a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    /// The channel ID
    pub id: ChannelId,
    /// The channel name
    pub name: String,
    /// Text or voice
    pub kind: ChannelKind,
}

/// One guild's mutation surface.
///
/// Every method maps to a single platform request; nothing is retried here.
/// Deletions report an already-missing target as [`crate::errors::Error::ChannelGone`]
/// or [`crate::errors::Error::RoleGone`] so callers can decide whether that is
/// fatal.
#[allow(async_fn_in_trait)]
pub trait GuildHost {
    /// The guild's `@everyone` role, used for default-deny overwrites.
    fn everyone_role(&self) -> RoleId;

    /// Creates a category channel with the given permission overwrites.
    async fn create_category(
        &self,
        name: &str,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId>;

    /// Creates a text or voice channel under `parent` with the given overwrites.
    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId>;

    /// Renames a channel (categories included).
    async fn rename_channel(&self, channel: ChannelId, name: &str) -> Result<()>;

    /// Deletes a channel (categories included).
    async fn delete_channel(&self, channel: ChannelId) -> Result<()>;

    /// Lists the text and voice channels directly under a category.
    async fn channels_in_category(&self, parent: ChannelId) -> Result<Vec<ChannelSummary>>;

    /// Creates a role with the given guild-level permission set.
    async fn create_role(&self, name: &str, permissions: Permissions) -> Result<RoleId>;

    /// Renames a role.
    async fn rename_role(&self, role: RoleId, name: &str) -> Result<()>;

    /// Changes a role's display colour.
    async fn recolour_role(&self, role: RoleId, colour: Colour) -> Result<()>;

    /// Deletes a role.
    async fn delete_role(&self, role: RoleId) -> Result<()>;

    /// Resolves a member by account username and discriminator.
    async fn find_member(
        &self,
        username: &str,
        discriminator: &str,
    ) -> Result<Option<MemberProfile>>;

    /// Whether the member currently holds the role.
    async fn member_has_role(&self, user: UserId, role: RoleId) -> Result<bool>;

    /// Grants a role to a member.
    async fn add_member_role(&self, user: UserId, role: RoleId) -> Result<()>;

    /// Revokes a role from a member.
    async fn remove_member_role(&self, user: UserId, role: RoleId) -> Result<()>;

    /// Lists every member currently holding the role.
    async fn members_with_role(&self, role: RoleId) -> Result<Vec<MemberProfile>>;

    /// Sends a direct message to a member.
    async fn dm_member(&self, user: UserId, content: &str) -> Result<()>;
}
