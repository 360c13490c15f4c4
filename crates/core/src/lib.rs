//! Domain logic for the mixtape service.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types and rules.

pub mod asset_link;
pub mod error;
pub mod mixtape;
pub mod types;
pub mod upload;
