//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and issuing, for tests and tooling).

pub mod jwt;
