//! Ownership authorization policy.
//!
//! Every mutating handler consults this one component instead of comparing
//! role strings inline. There are exactly two capability levels: the owner
//! of a listing and an admin. Admins additionally hold exclusive moderation
//! rights.

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Capability decisions for listing and account mutations.
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Whether the caller may update or delete the given listing.
    ///
    /// True iff the caller is an admin or owns the listing.
    pub fn can_mutate_listing(caller_id: DbId, caller_role: &str, owner_id: DbId) -> bool {
        caller_role == ROLE_ADMIN || caller_id == owner_id
    }

    /// Whether the caller may approve or reject listings. Admin only --
    /// an owner can never moderate their own listing.
    pub fn can_moderate(caller_role: &str) -> bool {
        caller_role == ROLE_ADMIN
    }

    /// Whether the caller may view the pending moderation queue. Admin only.
    pub fn can_view_pending(caller_role: &str) -> bool {
        caller_role == ROLE_ADMIN
    }
}
