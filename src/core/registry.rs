//! Campaign registry queries.
//!
//! The registry is the system of record for which platform objects a
//! campaign owns. All lookups go through here instead of scanning live
//! guild state by name; the unique indexes created with the tables turn
//! duplicate inserts into typed conflict errors.

use crate::{
    entities::{Campaign, Player, campaign, player},
    errors::{Error, Result},
};
use poise::serenity_prelude::{ChannelId, GuildId, RoleId, UserId};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// The platform object IDs one campaign owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignHandles {
    /// The category channel
    pub category: ChannelId,
    /// The Player role
    pub player_role: RoleId,
    /// The Dungeon Master role
    pub dm_role: RoleId,
}

fn parse_snowflake(value: &str, field: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .ok()
        .filter(|v| *v != 0)
        .ok_or_else(|| Error::Registry {
            message: format!("{field} '{value}' is not a valid snowflake"),
        })
}

/// Decodes a campaign row's stored snowflakes.
pub fn campaign_handles(row: &campaign::Model) -> Result<CampaignHandles> {
    Ok(CampaignHandles {
        category: ChannelId::new(parse_snowflake(&row.category_id, "category_id")?),
        player_role: RoleId::new(parse_snowflake(&row.player_role_id, "player_role_id")?),
        dm_role: RoleId::new(parse_snowflake(&row.dm_role_id, "dm_role_id")?),
    })
}

/// Decodes a membership row's stored log channel.
pub fn log_channel_id(entry: &player::Model) -> Result<ChannelId> {
    Ok(ChannelId::new(parse_snowflake(
        &entry.log_channel_id,
        "log_channel_id",
    )?))
}

/// Finds a campaign by guild and name.
pub async fn get_campaign(
    db: &DatabaseConnection,
    guild: GuildId,
    name: &str,
) -> Result<Option<campaign::Model>> {
    Campaign::find()
        .filter(campaign::Column::GuildId.eq(guild.get().to_string()))
        .filter(campaign::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a freshly created campaign.
///
/// A duplicate `(guild, name)` pair trips the unique index and is reported
/// as [`Error::CampaignExists`]; the caller is expected to compensate the
/// platform objects it just created.
pub async fn insert_campaign(
    db: &DatabaseConnection,
    guild: GuildId,
    name: &str,
    handles: &CampaignHandles,
) -> Result<campaign::Model> {
    let row = campaign::ActiveModel {
        guild_id: Set(guild.get().to_string()),
        name: Set(name.to_string()),
        category_id: Set(handles.category.get().to_string()),
        player_role_id: Set(handles.player_role.get().to_string()),
        dm_role_id: Set(handles.dm_role.get().to_string()),
        ..Default::default()
    };

    row.insert(db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            Error::CampaignExists {
                name: name.to_string(),
            }
        } else {
            e.into()
        }
    })
}

/// Updates a campaign row's name after a successful rename.
pub async fn rename_campaign(
    db: &DatabaseConnection,
    id: i64,
    new_name: &str,
) -> Result<campaign::Model> {
    let row = Campaign::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::Registry {
            message: format!("campaign row {id} vanished during rename"),
        })?;

    let mut active: campaign::ActiveModel = row.into();
    active.name = Set(new_name.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Removes a campaign row along with all of its member entries.
pub async fn delete_campaign(db: &DatabaseConnection, id: i64) -> Result<()> {
    Player::delete_many()
        .filter(player::Column::CampaignId.eq(id))
        .exec(db)
        .await?;
    Campaign::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Finds a member's entry in a campaign.
pub async fn get_player(
    db: &DatabaseConnection,
    campaign_id: i64,
    user: UserId,
) -> Result<Option<player::Model>> {
    Player::find()
        .filter(player::Column::CampaignId.eq(campaign_id))
        .filter(player::Column::UserId.eq(user.get().to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a member who has just been enrolled in a campaign.
pub async fn insert_player(
    db: &DatabaseConnection,
    campaign_id: i64,
    campaign_name: &str,
    user: UserId,
    user_tag: &str,
    log_channel: ChannelId,
) -> Result<player::Model> {
    let row = player::ActiveModel {
        campaign_id: Set(campaign_id),
        user_id: Set(user.get().to_string()),
        user_tag: Set(user_tag.to_string()),
        log_channel_id: Set(log_channel.get().to_string()),
        ..Default::default()
    };

    row.insert(db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            Error::PlayerAlreadyAdded {
                tag: user_tag.to_string(),
                campaign: campaign_name.to_string(),
            }
        } else {
            e.into()
        }
    })
}

/// Removes a member's entry.
pub async fn delete_player(db: &DatabaseConnection, id: i64) -> Result<()> {
    Player::delete_by_id(id).exec(db).await?;
    Ok(())
}
