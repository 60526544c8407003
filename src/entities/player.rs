//! Player entity - One member's membership in one campaign.
//!
//! Records the member alongside the private log channel created for them,
//! so removal can delete exactly the channel that creation made instead of
//! guessing at a name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Campaign membership model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_players")]
pub struct Model {
    /// Unique identifier for the membership row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The campaign this entry belongs to
    pub campaign_id: i64,
    /// Discord user ID of the member
    pub user_id: String,
    /// The `username#discriminator` tag the member was added under
    pub user_tag: String,
    /// The member's private log channel
    pub log_channel_id: String,
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each player entry belongs to one campaign
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id"
    )]
    Campaign,
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
