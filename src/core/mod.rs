//! Core business logic - framework-agnostic campaign, membership, and role
//! operations.
//!
//! Everything here is generic over [`crate::platform::GuildHost`], so the
//! same code runs against live Discord and against the in-memory fake guild
//! used in tests.

/// Campaign lifecycle manager (create, delete, rename)
pub mod campaign;
/// Channel factory and permission overwrite helpers
pub mod channels;
/// Player membership manager (add, remove)
pub mod player;
/// Campaign registry queries
pub mod registry;
/// Role permission bundles, colour parsing, and role-holder broadcast
pub mod roles;
/// Undo log for compensating partially-failed multi-step mutations
pub mod saga;

use crate::errors::{Error, Result};

/// Treats an already-deleted channel or role as success during teardown.
///
/// Campaign deletion must make progress even when someone removed one of the
/// campaign's objects by hand; anything else stays fatal.
pub(crate) fn tolerate_missing(result: Result<()>, context: &str) -> Result<()> {
    match result {
        Err(Error::ChannelGone { id }) => {
            tracing::warn!(id, "{context}: channel was already deleted, skipping");
            Ok(())
        }
        Err(Error::RoleGone { id }) => {
            tracing::warn!(id, "{context}: role was already deleted, skipping");
            Ok(())
        }
        other => other,
    }
}
