//! Unit test suite for muledeps
//!
//! Cross-module scenarios: extraction, merging, deduplication and resolution
//! wired together through in-memory collaborators, plus shared-library
//! propagation over resolved trees.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod additional_dependencies;
mod shared_libraries;
