//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response shape for API output
//! - `Deserialize` input DTOs for inserts and updates

pub mod book;
pub mod user;
