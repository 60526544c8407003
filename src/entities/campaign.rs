//! Campaign entity - The registry row for one campaign.
//!
//! Maps a campaign name to the platform objects it owns: the category and
//! the Player/Dungeon Master role pair. Discord snowflakes are stored as
//! strings. The `(guild_id, name)` pair is kept unique by an index created
//! alongside the tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Campaign registry model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    /// Unique identifier for the registry row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild the campaign lives in
    pub guild_id: String,
    /// Display name; also the category name and the role-name prefix
    pub name: String,
    /// Category channel grouping the campaign's channels
    pub category_id: String,
    /// The "`<name>` Player" role
    pub player_role_id: String,
    /// The "`<name>` Dungeon Master" role
    pub dm_role_id: String,
}

/// Defines relationships between Campaign and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One campaign has many player entries
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
