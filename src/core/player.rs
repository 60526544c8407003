//! Player membership manager - add and remove campaign players.
//!
//! Adding a player creates their private log channel and grants the Player
//! role, with compensations recorded so a failure partway leaves no trace.
//! Removal deletes exactly the log channel recorded at enrollment time, so
//! the channel found is always the channel created regardless of how the
//! member's name would slug today.

use crate::{
    core::{
        channels, registry,
        saga::{Compensation, UndoLog},
    },
    entities::player,
    errors::{Error, Result},
    platform::{ChannelKind, GuildHost, MemberProfile},
};
use poise::serenity_prelude::GuildId;
use sea_orm::DatabaseConnection;

/// A parsed `username#discriminator` player identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTag {
    /// The account username
    pub username: String,
    /// The numeric discriminator as written (`0` for migrated accounts)
    pub discriminator: String,
}

/// Splits a player identifier into username and discriminator.
///
/// # Errors
/// Returns [`Error::MalformedPlayerTag`] unless the input is exactly two
/// non-empty parts joined by `#`.
pub fn parse_player_tag(tag: &str) -> Result<PlayerTag> {
    let mut parts = tag.split('#');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(discriminator), None)
            if !username.is_empty() && !discriminator.is_empty() =>
        {
            Ok(PlayerTag {
                username: username.to_string(),
                discriminator: discriminator.to_string(),
            })
        }
        _ => Err(Error::MalformedPlayerTag {
            tag: tag.to_string(),
        }),
    }
}

/// The name of a member's private log channel.
#[must_use]
pub fn log_channel_name(username: &str) -> String {
    let slug = username
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}-log")
}

/// Adds one player to a campaign: log channel, Player role, registry entry.
pub async fn add_player<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    campaign_name: &str,
    tag: &str,
) -> Result<player::Model> {
    let row = registry::get_campaign(db, guild, campaign_name)
        .await?
        .ok_or_else(|| Error::CampaignNotFound {
            name: campaign_name.to_string(),
        })?;
    let handles = registry::campaign_handles(&row)?;

    let parsed = parse_player_tag(tag)?;
    let member = host
        .find_member(&parsed.username, &parsed.discriminator)
        .await?
        .ok_or_else(|| Error::MemberNotFound {
            tag: tag.to_string(),
        })?;

    if registry::get_player(db, row.id, member.user_id).await?.is_some() {
        return Err(Error::PlayerAlreadyAdded {
            tag: tag.to_string(),
            campaign: row.name.clone(),
        });
    }

    let mut undo = UndoLog::new();
    match enroll(host, db, &row, &handles, &member, tag, &mut undo).await {
        Ok(entry) => {
            undo.commit();
            tracing::info!(campaign = %row.name, player = tag, "Player added");
            Ok(entry)
        }
        Err(e) => {
            tracing::warn!(
                campaign = %row.name,
                player = tag,
                "Player enrollment failed, unwinding: {e}"
            );
            undo.unwind(host).await;
            Err(e)
        }
    }
}

async fn enroll<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    row: &crate::entities::campaign::Model,
    handles: &registry::CampaignHandles,
    member: &MemberProfile,
    tag: &str,
    undo: &mut UndoLog,
) -> Result<player::Model> {
    let overwrites = vec![
        channels::deny_everyone(host.everyone_role()),
        channels::member_text_overwrite(member.user_id),
        channels::text_overwrite(handles.dm_role, true, true),
    ];
    let log_channel = host
        .create_channel(
            &log_channel_name(&member.username),
            ChannelKind::Text,
            handles.category,
            overwrites,
        )
        .await?;
    undo.record(Compensation::DeleteChannel(log_channel));

    host.add_member_role(member.user_id, handles.player_role)
        .await?;
    undo.record(Compensation::RemoveMemberRole(
        member.user_id,
        handles.player_role,
    ));

    registry::insert_player(db, row.id, &row.name, member.user_id, tag, log_channel).await
}

/// Removes one player from a campaign: log channel, Player role, registry
/// entry.
///
/// The member must currently hold the campaign's Player role; an already
/// deleted log channel is tolerated.
pub async fn remove_player<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    campaign_name: &str,
    tag: &str,
) -> Result<()> {
    let row = registry::get_campaign(db, guild, campaign_name)
        .await?
        .ok_or_else(|| Error::CampaignNotFound {
            name: campaign_name.to_string(),
        })?;
    let handles = registry::campaign_handles(&row)?;

    let parsed = parse_player_tag(tag)?;
    let member = host
        .find_member(&parsed.username, &parsed.discriminator)
        .await?
        .ok_or_else(|| Error::MemberNotFound {
            tag: tag.to_string(),
        })?;

    if !host.member_has_role(member.user_id, handles.player_role).await? {
        return Err(Error::PlayerNotInCampaign {
            tag: tag.to_string(),
            campaign: row.name.clone(),
        });
    }
    let entry = registry::get_player(db, row.id, member.user_id)
        .await?
        .ok_or_else(|| Error::PlayerNotInCampaign {
            tag: tag.to_string(),
            campaign: row.name.clone(),
        })?;

    let log_channel = registry::log_channel_id(&entry)?;
    if let Err(e) = host.delete_channel(log_channel).await {
        match e {
            Error::ChannelGone { id } => {
                tracing::warn!(id, "Log channel was already deleted, skipping");
            }
            _ => return Err(e),
        }
    }

    host.remove_member_role(member.user_id, handles.player_role)
        .await?;
    registry::delete_player(db, entry.id).await?;
    tracing::info!(campaign = %row.name, player = tag, "Player removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::channels::default_template;
    use crate::core::campaign::create_campaign;
    use crate::test_utils::{FakeGuild, setup_test_db};
    use poise::serenity_prelude::Permissions;

    fn test_guild() -> GuildId {
        GuildId::new(900_000)
    }

    async fn guild_with_campaign() -> Result<(FakeGuild, DatabaseConnection)> {
        let guild = FakeGuild::new();
        let db = setup_test_db().await?;
        let dm = guild.add_member("marisha", "4444");
        create_campaign(&guild, &db, test_guild(), &default_template(), "Saga", dm).await?;
        Ok((guild, db))
    }

    #[test]
    fn test_parse_player_tag() {
        let tag = parse_player_tag("alice#1111").unwrap();
        assert_eq!(tag.username, "alice");
        assert_eq!(tag.discriminator, "1111");

        assert!(matches!(
            parse_player_tag("alice").unwrap_err(),
            Error::MalformedPlayerTag { .. }
        ));
        assert!(matches!(
            parse_player_tag("a#b#c").unwrap_err(),
            Error::MalformedPlayerTag { .. }
        ));
        assert!(matches!(
            parse_player_tag("#1111").unwrap_err(),
            Error::MalformedPlayerTag { .. }
        ));
        assert!(matches!(
            parse_player_tag("alice#").unwrap_err(),
            Error::MalformedPlayerTag { .. }
        ));
    }

    #[test]
    fn test_log_channel_name_slugs() {
        assert_eq!(log_channel_name("Alice"), "alice-log");
        assert_eq!(log_channel_name("Sir Galahad"), "sir-galahad-log");
    }

    #[tokio::test]
    async fn test_add_player_grants_role_and_log_channel() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        let alice = guild.add_member("alice", "1111");

        let entry = add_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;
        assert_eq!(entry.user_tag, "alice#1111");

        let (player_role_id, _) = guild.role_named("Saga Player").unwrap();
        assert!(guild.member_has_role(alice, player_role_id).await?);

        let (category_id, _) = guild.channel_named("Saga").unwrap();
        let (log_id, log) = guild.channel_named("alice-log").unwrap();
        assert_eq!(log.parent, Some(category_id));
        assert_eq!(entry.log_channel_id, log_id.get().to_string());

        // Private: @everyone denied, the member and the DM role allowed.
        let (_, everyone_deny) = log.overwrite_for_role(guild.everyone_role()).unwrap();
        assert_eq!(everyone_deny, Permissions::VIEW_CHANNEL);
        let (member_allow, _) = log.overwrite_for_member(alice).unwrap();
        assert!(member_allow.contains(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES));
        let (dm_role_id, _) = guild.role_named("Saga Dungeon Master").unwrap();
        let (dm_allow, _) = log.overwrite_for_role(dm_role_id).unwrap();
        assert!(dm_allow.contains(Permissions::VIEW_CHANNEL));

        // The Player role itself has no overwrite on the log channel.
        assert!(log.overwrite_for_role(player_role_id).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_player_malformed_tag_mutates_nothing() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        guild.add_member("alice", "1111");
        let ops_before = guild.ops().len();

        let err = add_player(&guild, &db, test_guild(), "Saga", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedPlayerTag { .. }));
        assert_eq!(guild.ops().len(), ops_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_player_unknown_member() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        let ops_before = guild.ops().len();

        let err = add_player(&guild, &db, test_guild(), "Saga", "ghost#9999")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MemberNotFound { .. }));
        assert_eq!(guild.ops().len(), ops_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_player_twice_is_a_conflict() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        guild.add_member("alice", "1111");

        add_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;
        let err = add_player(&guild, &db, test_guild(), "Saga", "alice#1111")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PlayerAlreadyAdded { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_player_failure_unwinds_log_channel() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        let alice = guild.add_member("alice", "1111");
        guild.fail_on("add_member_role:Saga Player");

        let result = add_player(&guild, &db, test_guild(), "Saga", "alice#1111").await;
        assert!(result.is_err());

        assert!(guild.channel_named("alice-log").is_none());
        let (player_role_id, _) = guild.role_named("Saga Player").unwrap();
        assert!(!guild.member_has_role(alice, player_role_id).await?);

        let row = registry::get_campaign(&db, test_guild(), "Saga").await?.unwrap();
        assert!(registry::get_player(&db, row.id, alice).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_player_reverses_add() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        let alice = guild.add_member("alice", "1111");

        add_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;
        remove_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;

        assert!(guild.channel_named("alice-log").is_none());
        let (player_role_id, _) = guild.role_named("Saga Player").unwrap();
        assert!(!guild.member_has_role(alice, player_role_id).await?);

        let row = registry::get_campaign(&db, test_guild(), "Saga").await?.unwrap();
        assert!(registry::get_player(&db, row.id, alice).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_player_without_role_is_specific_error() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        guild.add_member("alice", "1111");
        let ops_before = guild.ops().len();

        let err = remove_player(&guild, &db, test_guild(), "Saga", "alice#1111")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PlayerNotInCampaign { .. }));
        assert_eq!(guild.ops().len(), ops_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_player_tolerates_missing_log_channel() -> Result<()> {
        let (guild, db) = guild_with_campaign().await?;
        let alice = guild.add_member("alice", "1111");

        let entry = add_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;
        let log_channel = registry::log_channel_id(&entry)?;
        guild.delete_channel(log_channel).await?;

        remove_player(&guild, &db, test_guild(), "Saga", "alice#1111").await?;

        let (player_role_id, _) = guild.role_named("Saga Player").unwrap();
        assert!(!guild.member_has_role(alice, player_role_id).await?);
        Ok(())
    }
}
