//! Campaign channel template loading from config.toml
//!
//! Every campaign is created with the same fixed set of channels. The
//! built-in template matches the channels a tabletop campaign needs out of
//! the box; a `[[channels]]` list in `config.toml` can replace it wholesale.

use crate::errors::{Error, Result};
use crate::platform::ChannelKind;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the `config.toml` file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The channel template to use instead of the built-in one
    pub channels: Vec<ChannelSpec>,
}

/// One entry of the campaign channel template
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    /// Channel name
    pub name: String,
    /// `text` or `voice`
    pub kind: ChannelKind,
    /// Whether the Player role may see the channel (text only)
    #[serde(default)]
    pub player_read: bool,
    /// Whether the Player role may post in the channel (text only)
    #[serde(default)]
    pub player_write: bool,
}

impl ChannelSpec {
    fn entry(name: &str, kind: ChannelKind, player_read: bool, player_write: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            player_read,
            player_write,
        }
    }
}

/// The channels every campaign starts with.
#[must_use]
pub fn default_template() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec::entry("campaign-chronicle", ChannelKind::Text, true, false),
        ChannelSpec::entry("campaign-general", ChannelKind::Text, true, true),
        ChannelSpec::entry("reactions", ChannelKind::Text, true, true),
        ChannelSpec::entry("dm-notes", ChannelKind::Text, false, false),
        ChannelSpec::entry("bot-commands", ChannelKind::Text, false, false),
        ChannelSpec::entry("session-voice", ChannelKind::Voice, true, true),
        ChannelSpec::entry("other-voice", ChannelKind::Voice, true, true),
    ]
}

/// Loads a channel template from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or
/// the template is empty.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Vec<ChannelSpec>> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.channels.is_empty() {
        return Err(Error::Config {
            message: "config.toml defines an empty [[channels]] template".to_string(),
        });
    }

    Ok(config.channels)
}

/// Loads the template from `path` if the file exists, otherwise returns the
/// built-in default.
pub fn load_template_or_default<P: AsRef<Path>>(path: P) -> Result<Vec<ChannelSpec>> {
    if path.as_ref().exists() {
        load_template(path)
    } else {
        tracing::info!("No config.toml found, using the built-in channel template.");
        Ok(default_template())
    }
}
