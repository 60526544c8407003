//! Shared test utilities for `RpgAssistant`.
//!
//! This module provides the in-memory `SQLite` setup used by registry tests
//! and [`FakeGuild`], an in-memory [`GuildHost`] with scriptable failures.
//! The fake journals every mutation it performs, which lets tests assert
//! both "nothing happened" and the exact order of teardown operations.

#![allow(clippy::unwrap_used)]

use crate::{
    config,
    errors::{Error, Result},
    platform::{ChannelKind, ChannelSummary, GuildHost, MemberProfile},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use serenity::{
    ChannelId, Colour, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// Guild snowflake shared by every fake guild; doubles as its `@everyone`
/// role ID, mirroring Discord.
pub const TEST_GUILD_ID: u64 = 900_000;

/// Creates an in-memory `SQLite` registry with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// One channel in the fake guild.
#[derive(Debug, Clone)]
pub struct FakeChannel {
    /// Channel name
    pub name: String,
    /// Text or voice (categories are text for bookkeeping purposes)
    pub kind: ChannelKind,
    /// The category the channel sits under, if any
    pub parent: Option<ChannelId>,
    /// Permission overwrites applied at creation
    pub overwrites: Vec<PermissionOverwrite>,
    /// Whether this channel is a category
    pub is_category: bool,
}

impl FakeChannel {
    /// The `(allow, deny)` pair of the overwrite targeting `role`, if any.
    #[must_use]
    pub fn overwrite_for_role(&self, role: RoleId) -> Option<(Permissions, Permissions)> {
        self.overwrites
            .iter()
            .find(|o| o.kind == PermissionOverwriteType::Role(role))
            .map(|o| (o.allow, o.deny))
    }

    /// The `(allow, deny)` pair of the overwrite targeting `user`, if any.
    #[must_use]
    pub fn overwrite_for_member(&self, user: UserId) -> Option<(Permissions, Permissions)> {
        self.overwrites
            .iter()
            .find(|o| o.kind == PermissionOverwriteType::Member(user))
            .map(|o| (o.allow, o.deny))
    }
}

/// One role in the fake guild.
#[derive(Debug, Clone)]
pub struct FakeRole {
    /// Role name
    pub name: String,
    /// Guild-level permission bundle
    pub permissions: Permissions,
    /// Display colour
    pub colour: Colour,
}

#[derive(Debug, Clone)]
struct FakeMember {
    user_id: UserId,
    username: String,
    discriminator: String,
    roles: HashSet<RoleId>,
}

#[derive(Default)]
struct GuildState {
    next_id: u64,
    channels: BTreeMap<ChannelId, FakeChannel>,
    roles: BTreeMap<RoleId, FakeRole>,
    members: Vec<FakeMember>,
    dms: Vec<(UserId, String)>,
    ops: Vec<String>,
    fail_ops: HashSet<String>,
}

impl GuildState {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Fails if the op was scripted to fail, otherwise journals it.
    fn attempt(&mut self, key: String) -> Result<()> {
        if self.fail_ops.contains(&key) {
            return Err(Error::Discord(serenity::Error::Other("injected failure")));
        }
        self.ops.push(key);
        Ok(())
    }
}

/// An in-memory guild implementing [`GuildHost`].
///
/// Mutations are journaled as `"<op>:<target name>"` strings; queries are
/// not. [`FakeGuild::fail_on`] makes the named op fail with an injected
/// platform error instead of running (and keeps it out of the journal).
#[derive(Default)]
pub struct FakeGuild {
    state: Mutex<GuildState>,
}

impl FakeGuild {
    /// Creates an empty fake guild.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member with the given username and discriminator.
    pub fn add_member(&self, username: &str, discriminator: &str) -> UserId {
        let mut state = self.state.lock().unwrap();
        let id = UserId::new(state.alloc_id());
        state.members.push(FakeMember {
            user_id: id,
            username: username.to_string(),
            discriminator: discriminator.to_string(),
            roles: HashSet::new(),
        });
        id
    }

    /// Scripts the op with the given journal key to fail.
    pub fn fail_on(&self, op: &str) {
        self.state.lock().unwrap().fail_ops.insert(op.to_string());
    }

    /// The mutation journal so far.
    #[must_use]
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    /// Finds a channel (or category) by name.
    #[must_use]
    pub fn channel_named(&self, name: &str) -> Option<(ChannelId, FakeChannel)> {
        self.state
            .lock()
            .unwrap()
            .channels
            .iter()
            .find(|(_, c)| c.name == name)
            .map(|(id, c)| (*id, c.clone()))
    }

    /// Finds a role by name.
    #[must_use]
    pub fn role_named(&self, name: &str) -> Option<(RoleId, FakeRole)> {
        self.state
            .lock()
            .unwrap()
            .roles
            .iter()
            .find(|(_, r)| r.name == name)
            .map(|(id, r)| (*id, r.clone()))
    }

    /// Number of channels, categories included.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.state.lock().unwrap().channels.len()
    }

    /// Number of roles (`@everyone` is implicit and not counted).
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.state.lock().unwrap().roles.len()
    }

    /// Direct messages delivered so far.
    #[must_use]
    pub fn dms(&self) -> Vec<(UserId, String)> {
        self.state.lock().unwrap().dms.clone()
    }
}

impl GuildHost for FakeGuild {
    fn everyone_role(&self) -> RoleId {
        RoleId::new(TEST_GUILD_ID)
    }

    async fn create_category(
        &self,
        name: &str,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId> {
        let mut state = self.state.lock().unwrap();
        state.attempt(format!("create_category:{name}"))?;
        let id = ChannelId::new(state.alloc_id());
        state.channels.insert(
            id,
            FakeChannel {
                name: name.to_string(),
                kind: ChannelKind::Text,
                parent: None,
                overwrites,
                is_category: true,
            },
        );
        Ok(id)
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
        overwrites: Vec<PermissionOverwrite>,
    ) -> Result<ChannelId> {
        let mut state = self.state.lock().unwrap();
        state.attempt(format!("create_channel:{name}"))?;
        let id = ChannelId::new(state.alloc_id());
        state.channels.insert(
            id,
            FakeChannel {
                name: name.to_string(),
                kind,
                parent: Some(parent),
                overwrites,
                is_category: false,
            },
        );
        Ok(id)
    }

    async fn rename_channel(&self, channel: ChannelId, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.channels.contains_key(&channel) {
            return Err(Error::ChannelGone { id: channel.get() });
        }
        state.attempt(format!("rename_channel:{name}"))?;
        if let Some(c) = state.channels.get_mut(&channel) {
            c.name = name.to_string();
        }
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(name) = state.channels.get(&channel).map(|c| c.name.clone()) else {
            return Err(Error::ChannelGone { id: channel.get() });
        };
        state.attempt(format!("delete_channel:{name}"))?;
        state.channels.remove(&channel);
        Ok(())
    }

    async fn channels_in_category(&self, parent: ChannelId) -> Result<Vec<ChannelSummary>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .channels
            .iter()
            .filter(|(_, c)| !c.is_category && c.parent == Some(parent))
            .map(|(id, c)| ChannelSummary {
                id: *id,
                name: c.name.clone(),
                kind: c.kind,
            })
            .collect())
    }

    async fn create_role(&self, name: &str, permissions: Permissions) -> Result<RoleId> {
        let mut state = self.state.lock().unwrap();
        state.attempt(format!("create_role:{name}"))?;
        let id = RoleId::new(state.alloc_id());
        state.roles.insert(
            id,
            FakeRole {
                name: name.to_string(),
                permissions,
                colour: Colour::new(0),
            },
        );
        Ok(id)
    }

    async fn rename_role(&self, role: RoleId, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.roles.contains_key(&role) {
            return Err(Error::RoleGone { id: role.get() });
        }
        state.attempt(format!("rename_role:{name}"))?;
        if let Some(r) = state.roles.get_mut(&role) {
            r.name = name.to_string();
        }
        Ok(())
    }

    async fn recolour_role(&self, role: RoleId, colour: Colour) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(name) = state.roles.get(&role).map(|r| r.name.clone()) else {
            return Err(Error::RoleGone { id: role.get() });
        };
        state.attempt(format!("recolour_role:{name}"))?;
        if let Some(r) = state.roles.get_mut(&role) {
            r.colour = colour;
        }
        Ok(())
    }

    async fn delete_role(&self, role: RoleId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(name) = state.roles.get(&role).map(|r| r.name.clone()) else {
            return Err(Error::RoleGone { id: role.get() });
        };
        state.attempt(format!("delete_role:{name}"))?;
        state.roles.remove(&role);
        for member in &mut state.members {
            member.roles.remove(&role);
        }
        Ok(())
    }

    async fn find_member(
        &self,
        username: &str,
        discriminator: &str,
    ) -> Result<Option<MemberProfile>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .find(|m| m.username == username && m.discriminator == discriminator)
            .map(|m| MemberProfile {
                user_id: m.user_id,
                username: m.username.clone(),
            }))
    }

    async fn member_has_role(&self, user: UserId, role: RoleId) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .any(|m| m.user_id == user && m.roles.contains(&role)))
    }

    async fn add_member_role(&self, user: UserId, role: RoleId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(role_name) = state.roles.get(&role).map(|r| r.name.clone()) else {
            return Err(Error::RoleGone { id: role.get() });
        };
        state.attempt(format!("add_member_role:{role_name}"))?;
        let member = state
            .members
            .iter_mut()
            .find(|m| m.user_id == user)
            .ok_or(Error::Discord(serenity::Error::Other("unknown member")))?;
        member.roles.insert(role);
        Ok(())
    }

    async fn remove_member_role(&self, user: UserId, role: RoleId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(role_name) = state.roles.get(&role).map(|r| r.name.clone()) else {
            return Err(Error::RoleGone { id: role.get() });
        };
        state.attempt(format!("remove_member_role:{role_name}"))?;
        let member = state
            .members
            .iter_mut()
            .find(|m| m.user_id == user)
            .ok_or(Error::Discord(serenity::Error::Other("unknown member")))?;
        member.roles.remove(&role);
        Ok(())
    }

    async fn members_with_role(&self, role: RoleId) -> Result<Vec<MemberProfile>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|m| m.roles.contains(&role))
            .map(|m| MemberProfile {
                user_id: m.user_id,
                username: m.username.clone(),
            })
            .collect())
    }

    async fn dm_member(&self, user: UserId, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(username) = state
            .members
            .iter()
            .find(|m| m.user_id == user)
            .map(|m| m.username.clone())
        else {
            return Err(Error::Discord(serenity::Error::Other("unknown member")));
        };
        state.attempt(format!("dm_member:{username}"))?;
        state.dms.push((user, content.to_string()));
        Ok(())
    }
}
