//! Moderation state machine for product listings.
//!
//! Every listing starts `pending`. An admin either approves it (making it
//! eligible for the public feed) or rejects it. Rejection also forces the
//! listing unavailable; the two writes happen in a single UPDATE at the
//! repository layer. Re-review is out of scope: there is no path from
//! `approved` or `rejected` back to `pending`, and no direct path between
//! `approved` and `rejected`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Admin-controlled lifecycle flag on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A moderation decision taken by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationStatus {
    /// The database/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Parse the database representation.
    ///
    /// An unknown value means the stored row is corrupt, so this maps to
    /// [`CoreError::Internal`] rather than a validation error.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown moderation status '{other}' in database"
            ))),
        }
    }

    /// Apply a moderation action, returning the resulting status.
    ///
    /// Re-applying the action that produced the current terminal state is
    /// idempotent (approving an approved listing is a no-op, not an error).
    /// Crossing terminal states is rejected.
    pub fn apply(self, action: ModerationAction) -> Result<ModerationStatus, CoreError> {
        match (self, action) {
            (ModerationStatus::Pending, ModerationAction::Approve) => {
                Ok(ModerationStatus::Approved)
            }
            (ModerationStatus::Pending, ModerationAction::Reject) => Ok(ModerationStatus::Rejected),
            (ModerationStatus::Approved, ModerationAction::Approve) => {
                Ok(ModerationStatus::Approved)
            }
            (ModerationStatus::Rejected, ModerationAction::Reject) => {
                Ok(ModerationStatus::Rejected)
            }
            (ModerationStatus::Approved, ModerationAction::Reject) => Err(CoreError::Validation(
                "Cannot reject an already approved listing".to_string(),
            )),
            (ModerationStatus::Rejected, ModerationAction::Approve) => Err(CoreError::Validation(
                "Cannot approve an already rejected listing".to_string(),
            )),
        }
    }

    /// Whether entering this status forces `is_available = false`.
    pub fn forces_unavailable(self) -> bool {
        matches!(self, ModerationStatus::Rejected)
    }
}
