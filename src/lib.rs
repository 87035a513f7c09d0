//! muledeps - additional dependency resolution for Mule applications
//!
//! A Mule application bundles plugins, each isolated in its own classloader.
//! Some plugins need extra libraries at runtime (a JDBC driver for a database
//! connector, for instance) that are not part of their own dependency tree.
//! Those libraries are declared as *additional plugin dependencies*, either by
//! the application or inside a plugin's own build metadata.
//!
//! This crate computes, for every plugin, the net-new dependencies it needs:
//!
//! 1. Declarations embedded in each plugin's build model are extracted
//! 2. Conflicting declarations are merged, the application winning outright
//!    over embedded declarations and the newest version winning otherwise
//! 3. Dependencies the plugin already carries are dropped
//! 4. The rest is resolved through a [`resolver::DependencyResolver`]
//!
//! It also propagates the *shared* flag from nominated shared libraries to
//! their whole transitive closure (see [`shared`]).
//!
//! # Modules
//!
//! - [`core`] - Error type and user-facing error reporting
//! - [`models`] - Coordinates, declarations, resolved dependencies, artifacts
//! - [`version`] - Version ordering used to settle conflicts
//! - [`metadata`] - Build-model documents and declaration extraction
//! - [`resolver`] - Merger, deduplication and additional-dependency resolution
//! - [`shared`] - Shared-library nominations and propagation
//! - [`config`] - Packager configuration (`muledeps.toml`)
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use muledeps_cli::metadata::FileBuildModelReader;
//! use muledeps_cli::resolver::{AdditionalDependenciesResolver, IndexResolver, RepositoryIndex};
//!
//! # fn example(
//! #     application: Vec<muledeps_cli::models::ResolvedDependency>,
//! #     plugin_models: Vec<muledeps_cli::models::ClassLoaderModel>,
//! # ) -> muledeps_cli::core::Result<()> {
//! let resolver = IndexResolver::new(RepositoryIndex::default());
//! let reader = FileBuildModelReader::new();
//! let additional = AdditionalDependenciesResolver::new(&resolver, &reader, Vec::new(), "/repo")
//!     .resolve_dependencies(&application, &plugin_models)?;
//! for entry in additional.iter() {
//!     println!("{} needs {} more", entry.plugin, entry.additional_dependencies.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod metadata;
pub mod models;
pub mod resolver;
pub mod shared;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
