//! Channel factory - builds campaign channels with their permission
//! overwrites applied at creation time.
//!
//! Text channels differentiate players by the template's read/write flags;
//! voice channels grant both campaign roles the same connect/speak set. The
//! `@everyone` role is always denied view so a campaign stays invisible to
//! non-members.

use crate::{
    config::channels::ChannelSpec,
    errors::Result,
    platform::{ChannelKind, GuildHost},
};
use poise::serenity_prelude::{
    ChannelId, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};

/// Hides a channel (or category) from the guild's default role.
#[must_use]
pub fn deny_everyone(everyone: RoleId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::VIEW_CHANNEL,
        kind: PermissionOverwriteType::Role(everyone),
    }
}

/// The text-channel overwrite for a campaign role.
///
/// History stays readable whenever the channel is visible at all; view and
/// send are explicit allows or denies so the result never depends on what
/// the category happens to inherit.
#[must_use]
pub fn text_overwrite(role: RoleId, can_read: bool, can_write: bool) -> PermissionOverwrite {
    let mut allow = Permissions::READ_MESSAGE_HISTORY;
    let mut deny = Permissions::empty();
    if can_read {
        allow |= Permissions::VIEW_CHANNEL;
    } else {
        deny |= Permissions::VIEW_CHANNEL;
    }
    if can_write {
        allow |= Permissions::SEND_MESSAGES;
    } else {
        deny |= Permissions::SEND_MESSAGES;
    }
    PermissionOverwrite {
        allow,
        deny,
        kind: PermissionOverwriteType::Role(role),
    }
}

/// The voice-channel overwrite for a campaign role.
#[must_use]
pub fn voice_overwrite(role: RoleId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL
            | Permissions::CONNECT
            | Permissions::SPEAK
            | Permissions::STREAM,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(role),
    }
}

/// The overwrite that opens a private channel to one member.
#[must_use]
pub fn member_text_overwrite(user: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL
            | Permissions::READ_MESSAGE_HISTORY
            | Permissions::SEND_MESSAGES,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(user),
    }
}

/// Creates one template channel under the campaign category.
///
/// The Dungeon Master role always gets full access to text channels; the
/// Player role gets whatever the template entry says.
pub async fn create_campaign_channel<H: GuildHost>(
    host: &H,
    spec: &ChannelSpec,
    category: ChannelId,
    player_role: RoleId,
    dm_role: RoleId,
) -> Result<ChannelId> {
    let mut overwrites = vec![deny_everyone(host.everyone_role())];
    match spec.kind {
        ChannelKind::Text => {
            overwrites.push(text_overwrite(player_role, spec.player_read, spec.player_write));
            overwrites.push(text_overwrite(dm_role, true, true));
        }
        ChannelKind::Voice => {
            overwrites.push(voice_overwrite(player_role));
            overwrites.push(voice_overwrite(dm_role));
        }
    }
    host.create_channel(&spec.name, spec.kind, category, overwrites)
        .await
}
