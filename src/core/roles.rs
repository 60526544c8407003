//! Role business logic - permission bundles, role naming, colour parsing,
//! and the role-holder broadcast.
//!
//! The two campaign roles carry fixed guild-level permission bundles; the
//! Dungeon Master bundle is a strict superset of the Player bundle, adding
//! the moderation bits a table runner needs.

use crate::{
    errors::{Error, Result},
    platform::GuildHost,
};
use poise::serenity_prelude::{Colour, Permissions, RoleId};

/// The name of a campaign's Player role.
#[must_use]
pub fn player_role_name(campaign: &str) -> String {
    format!("{campaign} Player")
}

/// The name of a campaign's Dungeon Master role.
#[must_use]
pub fn dungeon_master_role_name(campaign: &str) -> String {
    format!("{campaign} Dungeon Master")
}

/// Guild-level permissions granted to every campaign player.
#[must_use]
pub fn player_permissions() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::CONNECT
        | Permissions::USE_EXTERNAL_EMOJIS
        | Permissions::CHANGE_NICKNAME
        | Permissions::SPEAK
        | Permissions::STREAM
        | Permissions::EMBED_LINKS
        | Permissions::ATTACH_FILES
        | Permissions::ADD_REACTIONS
}

/// Guild-level permissions granted to a campaign's Dungeon Master.
#[must_use]
pub fn dungeon_master_permissions() -> Permissions {
    player_permissions()
        | Permissions::MENTION_EVERYONE
        | Permissions::PRIORITY_SPEAKER
        | Permissions::MUTE_MEMBERS
        | Permissions::MOVE_MEMBERS
        | Permissions::DEAFEN_MEMBERS
}

/// Parses a bare hex colour code (no leading `#`) into a display colour.
///
/// # Errors
/// Returns [`Error::InvalidColour`] for anything that is not 1 to 6 hex
/// digits; no mutation is attempted on invalid input.
pub fn parse_colour(input: &str) -> Result<Colour> {
    let well_formed = !input.is_empty()
        && input.len() <= 6
        && input.chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return Err(Error::InvalidColour {
            input: input.to_string(),
        });
    }

    let value = u32::from_str_radix(input, 16).map_err(|_| Error::InvalidColour {
        input: input.to_string(),
    })?;
    Ok(Colour::new(value))
}

/// Sends a direct message to every member currently holding `role`.
///
/// Individual delivery failures (closed DMs, for instance) are logged and
/// skipped. Returns how many members were reached.
pub async fn broadcast_to_role<H: GuildHost>(
    host: &H,
    role: RoleId,
    content: &str,
) -> Result<usize> {
    let members = host.members_with_role(role).await?;
    let mut delivered = 0;
    for member in &members {
        match host.dm_member(member.user_id, content).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!(user = %member.user_id, "Could not deliver role broadcast: {e}");
            }
        }
    }
    Ok(delivered)
}
