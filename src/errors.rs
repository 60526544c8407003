//! Unified error types and result handling.
//!
//! User-addressable failures (missing campaigns, malformed player tags,
//! bad colour codes) get their own variants so the bot layer can render
//! them as chat messages; everything else bubbles up to the framework
//! error handler.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading or parsing configuration
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Discord error: {0}")]
    Discord(#[from] poise::serenity_prelude::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Registry error: {message}")]
    Registry {
        /// Description of the corrupt or inconsistent registry state
        message: String,
    },

    #[error("No campaign named '{name}' is registered")]
    CampaignNotFound {
        /// The campaign name that was looked up
        name: String,
    },

    #[error("A campaign named '{name}' already exists")]
    CampaignExists {
        /// The conflicting campaign name
        name: String,
    },

    #[error("Channel {id} no longer exists")]
    ChannelGone {
        /// The channel ID that Discord reported as unknown
        id: u64,
    },

    #[error("Role {id} no longer exists")]
    RoleGone {
        /// The role ID that Discord reported as unknown
        id: u64,
    },

    #[error("No member matching '{tag}' was found in this server")]
    MemberNotFound {
        /// The `username#discriminator` tag that failed to resolve
        tag: String,
    },

    #[error("'{tag}' is not in the NAME#NUMBER format")]
    MalformedPlayerTag {
        /// The raw identifier the user supplied
        tag: String,
    },

    #[error("'{tag}' is already a player in campaign '{campaign}'")]
    PlayerAlreadyAdded {
        /// The player tag
        tag: String,
        /// The campaign name
        campaign: String,
    },

    #[error("'{tag}' does not hold the Player role for campaign '{campaign}'")]
    PlayerNotInCampaign {
        /// The player tag
        tag: String,
        /// The campaign name
        campaign: String,
    },

    #[error("'{input}' is not a hex colour code")]
    InvalidColour {
        /// The raw colour string the user supplied
        input: String,
    },
}

impl Error {
    /// Renders user-addressable errors as a chat-ready message.
    ///
    /// Returns `None` for internal failures (database, platform, config),
    /// which should go through the framework error handler instead.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::CampaignNotFound { name } => Some(format!(
                "❌ No campaign named **{name}** exists. Did you write the name correctly?"
            )),
            Self::CampaignExists { name } => {
                Some(format!("❌ A campaign named **{name}** already exists."))
            }
            Self::MemberNotFound { tag } => Some(format!("❌ No player called `{tag}` was found.")),
            Self::MalformedPlayerTag { tag } => Some(format!(
                "❌ `{tag}` is not valid. Please use the NAME#NUMBER format."
            )),
            Self::PlayerAlreadyAdded { tag, campaign } => {
                Some(format!("❌ `{tag}` is already a player in **{campaign}**."))
            }
            Self::PlayerNotInCampaign { tag, campaign } => Some(format!(
                "❌ `{tag}` does not have the required **{campaign} Player** role."
            )),
            Self::InvalidColour { input } => Some(format!(
                "❌ `{input}` is not a valid colour code. Use a hex code without the leading #."
            )),
            _ => None,
        }
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
