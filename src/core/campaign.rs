//! Campaign lifecycle manager - create, delete, and rename.
//!
//! Each lifecycle operation is a short sequence of platform calls recorded
//! in an [`UndoLog`]: a failure partway through creation or renaming
//! compensates the steps that already ran instead of leaving a half-built
//! campaign behind. Deletion cannot be compensated and instead tolerates
//! objects that are already gone, so a torn campaign can always be removed.

use crate::{
    config::channels::ChannelSpec,
    core::{
        channels, registry,
        registry::CampaignHandles,
        roles,
        saga::{Compensation, UndoLog},
        tolerate_missing,
    },
    entities::campaign,
    errors::{Error, Result},
    platform::{ChannelKind, GuildHost},
};
use poise::serenity_prelude::{GuildId, UserId};
use sea_orm::DatabaseConnection;

/// Creates a campaign: category, Player and Dungeon Master roles, the full
/// channel template, the DM role on the invoker, and the registry row.
///
/// Any failure unwinds every platform object created so far. The registry
/// insert is last; if a concurrent create wins the race, this side's
/// objects are compensated and the conflict is reported.
pub async fn create_campaign<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    template: &[ChannelSpec],
    name: &str,
    dungeon_master: UserId,
) -> Result<campaign::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Campaign name cannot be empty".to_string(),
        });
    }
    if registry::get_campaign(db, guild, name).await?.is_some() {
        return Err(Error::CampaignExists {
            name: name.to_string(),
        });
    }

    let mut undo = UndoLog::new();
    match build_campaign(host, db, guild, template, name, dungeon_master, &mut undo).await {
        Ok(row) => {
            undo.commit();
            tracing::info!(campaign = name, "Campaign created");
            Ok(row)
        }
        Err(e) => {
            tracing::warn!(campaign = name, "Campaign creation failed, unwinding: {e}");
            undo.unwind(host).await;
            Err(e)
        }
    }
}

async fn build_campaign<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    template: &[ChannelSpec],
    name: &str,
    dungeon_master: UserId,
    undo: &mut UndoLog,
) -> Result<campaign::Model> {
    let category = host
        .create_category(name, vec![channels::deny_everyone(host.everyone_role())])
        .await?;
    undo.record(Compensation::DeleteChannel(category));

    let player_role = host
        .create_role(&roles::player_role_name(name), roles::player_permissions())
        .await?;
    undo.record(Compensation::DeleteRole(player_role));

    let dm_role = host
        .create_role(
            &roles::dungeon_master_role_name(name),
            roles::dungeon_master_permissions(),
        )
        .await?;
    undo.record(Compensation::DeleteRole(dm_role));

    for spec in template {
        let channel =
            channels::create_campaign_channel(host, spec, category, player_role, dm_role).await?;
        undo.record(Compensation::DeleteChannel(channel));
    }

    host.add_member_role(dungeon_master, dm_role).await?;
    undo.record(Compensation::RemoveMemberRole(dungeon_master, dm_role));

    let handles = CampaignHandles {
        category,
        player_role,
        dm_role,
    };
    registry::insert_campaign(db, guild, name, &handles).await
}

/// Deletes a campaign: its channels (text first, then voice), the category,
/// both roles, and the registry row.
///
/// Objects that were already removed by hand are skipped with a warning, so
/// deletion always makes as much progress as the platform allows.
pub async fn delete_campaign<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    name: &str,
) -> Result<()> {
    let row = registry::get_campaign(db, guild, name)
        .await?
        .ok_or_else(|| Error::CampaignNotFound {
            name: name.to_string(),
        })?;
    let handles = registry::campaign_handles(&row)?;

    let listed = host.channels_in_category(handles.category).await?;
    let (text, voice): (Vec<_>, Vec<_>) = listed
        .into_iter()
        .partition(|c| c.kind == ChannelKind::Text);
    for channel in text.iter().chain(voice.iter()) {
        tolerate_missing(host.delete_channel(channel.id).await, "delete_campaign")?;
    }

    tolerate_missing(host.delete_channel(handles.category).await, "delete_campaign")?;
    tolerate_missing(host.delete_role(handles.player_role).await, "delete_campaign")?;
    tolerate_missing(host.delete_role(handles.dm_role).await, "delete_campaign")?;

    registry::delete_campaign(db, row.id).await?;
    tracing::info!(campaign = name, "Campaign deleted");
    Ok(())
}

/// Renames a campaign: the category, both roles, and the registry row.
///
/// The three platform renames are not atomic, so each one records a
/// rename-back compensation; a failure partway restores the original names
/// instead of leaving the category and roles out of lockstep.
pub async fn rename_campaign<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    guild: GuildId,
    old_name: &str,
    new_name: &str,
) -> Result<campaign::Model> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(Error::Config {
            message: "Campaign name cannot be empty".to_string(),
        });
    }

    let row = registry::get_campaign(db, guild, old_name)
        .await?
        .ok_or_else(|| Error::CampaignNotFound {
            name: old_name.to_string(),
        })?;
    if registry::get_campaign(db, guild, new_name).await?.is_some() {
        return Err(Error::CampaignExists {
            name: new_name.to_string(),
        });
    }
    let handles = registry::campaign_handles(&row)?;

    let mut undo = UndoLog::new();
    match apply_rename(host, db, &row, &handles, new_name, &mut undo).await {
        Ok(updated) => {
            undo.commit();
            tracing::info!(from = old_name, to = new_name, "Campaign renamed");
            Ok(updated)
        }
        Err(e) => {
            tracing::warn!(
                from = old_name,
                to = new_name,
                "Campaign rename failed, restoring names: {e}"
            );
            undo.unwind(host).await;
            Err(e)
        }
    }
}

async fn apply_rename<H: GuildHost>(
    host: &H,
    db: &DatabaseConnection,
    row: &campaign::Model,
    handles: &CampaignHandles,
    new_name: &str,
    undo: &mut UndoLog,
) -> Result<campaign::Model> {
    host.rename_channel(handles.category, new_name).await?;
    undo.record(Compensation::RenameChannel(
        handles.category,
        row.name.clone(),
    ));

    host.rename_role(handles.player_role, &roles::player_role_name(new_name))
        .await?;
    undo.record(Compensation::RenameRole(
        handles.player_role,
        roles::player_role_name(&row.name),
    ));

    host.rename_role(
        handles.dm_role,
        &roles::dungeon_master_role_name(new_name),
    )
    .await?;
    undo.record(Compensation::RenameRole(
        handles.dm_role,
        roles::dungeon_master_role_name(&row.name),
    ));

    registry::rename_campaign(db, row.id, new_name).await
}
