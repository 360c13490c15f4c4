//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod mixtape_repo;

pub use mixtape_repo::MixtapeRepo;
