//! Request orchestration above the repository layer.

pub mod mixtape;

pub use mixtape::MixtapeService;
