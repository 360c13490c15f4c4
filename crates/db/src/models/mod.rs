//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching the database rows
//! - `Deserialize` DTOs describing what callers may write

pub mod mixtape;
