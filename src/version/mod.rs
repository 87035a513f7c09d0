//! Version handling for declared dependencies.
//!
//! - [`comparison`] - Loose semantic parsing and the tie-break used when two
//!   declarations name the same artifact at different versions

pub mod comparison;

pub use comparison::VersionComparator;
