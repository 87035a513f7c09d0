//! Configuration for muledeps.
//!
//! - [`PackagerConfig`] - Per-run settings loaded from `muledeps.toml`: local
//!   repository, active profiles, application-level declarations and
//!   shared-library nominations

mod packager;

pub use packager::PackagerConfig;
