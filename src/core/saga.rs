//! Undo log for multi-step guild mutations.
//!
//! Campaign creation, renaming, and player enrollment each perform several
//! platform calls in sequence. Every completed step records its compensation
//! here; if a later step fails, [`UndoLog::unwind`] applies the
//! compensations in reverse order so no partially-built campaign is left
//! behind. Unwinding is best effort: a compensation that itself fails is
//! logged and skipped.

use crate::platform::GuildHost;
use poise::serenity_prelude::{ChannelId, RoleId, UserId};

/// The inverse of one completed platform step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Delete a channel (or category) that was created
    DeleteChannel(ChannelId),
    /// Delete a role that was created
    DeleteRole(RoleId),
    /// Rename a channel back to its previous name
    RenameChannel(ChannelId, String),
    /// Rename a role back to its previous name
    RenameRole(RoleId, String),
    /// Revoke a role that was granted to a member
    RemoveMemberRole(UserId, RoleId),
}

/// Compensations recorded so far for one in-flight operation.
#[derive(Debug, Default)]
pub struct UndoLog {
    steps: Vec<Compensation>,
}

impl UndoLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Records the compensation for a step that just completed.
    pub fn record(&mut self, step: Compensation) {
        self.steps.push(step);
    }

    /// Number of recorded compensations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether any compensations have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Discards the log once the operation has fully succeeded.
    pub fn commit(self) {}

    /// Applies all recorded compensations in reverse order.
    ///
    /// Failures are logged and skipped so that one stubborn object does not
    /// stop the rest of the cleanup.
    pub async fn unwind<H: GuildHost>(self, host: &H) {
        for step in self.steps.into_iter().rev() {
            let outcome = match &step {
                Compensation::DeleteChannel(channel) => host.delete_channel(*channel).await,
                Compensation::DeleteRole(role) => host.delete_role(*role).await,
                Compensation::RenameChannel(channel, name) => {
                    host.rename_channel(*channel, name).await
                }
                Compensation::RenameRole(role, name) => host.rename_role(*role, name).await,
                Compensation::RemoveMemberRole(user, role) => {
                    host.remove_member_role(*user, *role).await
                }
            };
            if let Err(e) = outcome {
                tracing::warn!("Compensation {step:?} failed during unwind: {e}");
            }
        }
    }
}
