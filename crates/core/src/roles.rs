//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users
//! migration. There are exactly two capability levels: regular users and
//! admins. No moderator tier exists.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
