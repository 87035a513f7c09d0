//! Integration test suite for muledeps
//!
//! End-to-end tests that drive the `muledeps` binary against projects laid
//! out in temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **project**: Temporary project fixture (snapshot, config, repository)
//! - **resolve**: The `resolve` command
//! - **share**: The `share` command

mod resolve;
