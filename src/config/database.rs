//! Database configuration module for the campaign registry.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Two unique indexes are created on top: one keeps campaign names unique per guild
//! (which makes the create-time existence check atomic with the registry insert),
//! the other keeps a member from being registered twice in the same campaign.

use crate::entities::{Campaign, Player};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the `SQLite` registry using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/rpg-assistant.sqlite?mode=rwc".to_string());

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the registry tables and their unique indexes.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut campaign_table = schema.create_table_from_entity(Campaign);
    campaign_table.if_not_exists();
    let mut player_table = schema.create_table_from_entity(Player);
    player_table.if_not_exists();

    db.execute(builder.build(&campaign_table)).await?;
    db.execute(builder.build(&player_table)).await?;

    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_campaigns_guild_name \
         ON campaigns (guild_id, name)",
    )
    .await?;
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_campaign_players_campaign_user \
         ON campaign_players (campaign_id, user_id)",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CampaignModel, PlayerModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CampaignModel> = Campaign::find().limit(1).all(&db).await?;
        let _: Vec<PlayerModel> = Player::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<CampaignModel> = Campaign::find().limit(1).all(&db).await?;
        Ok(())
    }
}
