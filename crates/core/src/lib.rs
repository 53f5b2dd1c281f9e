//! Domain logic for the CampusMarket marketplace.
//!
//! This crate is pure: no I/O, no database access. It defines the error
//! taxonomy, the listing enums and moderation state machine, the ownership
//! authorization policy, and pagination math. The `db` and `api` crates
//! build on these types.

pub mod authorization;
pub mod error;
pub mod listing;
pub mod moderation;
pub mod pagination;
pub mod roles;
pub mod types;
