//! Entity models and DTOs.
//!
//! Full-row structs derive `FromRow` and stay inside the backend; wire-facing
//! response types serialize camelCase to match the client contract.

pub mod product;
pub mod user;
