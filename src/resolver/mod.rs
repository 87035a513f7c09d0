//! Additional plugin dependency resolution.
//!
//! This module computes, for every plugin embedded in an application, the
//! dependencies it needs beyond its own, and resolves them through a
//! [`DependencyResolver`].
//!
//! # Module Organization
//!
//! - [`merger`] - Folds declarations per plugin and applies application-level precedence
//! - [`dedup`] - Drops declarations already satisfied by a plugin's classloader model
//! - [`additional`] - Orchestrates extraction, merging, deduplication and resolution
//! - [`layout`] - Local repository layout (directories, file names, snapshot versions)
//! - [`index`] - [`IndexResolver`], a resolver backed by a repository index
//!
//! # The Resolver Contract
//!
//! The only external capability the core needs is "resolve these coordinates
//! to dependencies with their transitive trees". A request is a batch of
//! coordinates scoped to a local repository; the core never overrides remote
//! repositories and never retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use muledeps_cli::metadata::FileBuildModelReader;
//! use muledeps_cli::resolver::{AdditionalDependenciesResolver, IndexResolver, RepositoryIndex};
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = IndexResolver::new(RepositoryIndex::default());
//! let reader = FileBuildModelReader::new();
//! let additional = AdditionalDependenciesResolver::new(&resolver, &reader, Vec::new(), "/tmp/repo");
//! let mapping = additional.resolve_dependencies(&[], &[])?;
//! assert!(mapping.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod additional;
pub mod dedup;
pub mod index;
pub mod layout;
pub mod merger;

use std::path::PathBuf;
use url::Url;

use crate::core::Result;
use crate::models::{ArtifactCoordinates, ResolvedDependency};

pub use additional::{AdditionalDependencies, AdditionalDependenciesResolver, PluginAdditions};
pub use index::{IndexEntry, IndexResolver, RepositoryIndex};
pub use layout::RepositoryLayout;
pub use merger::{ConflictMerger, effective_declarations};

/// A batch of coordinates to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Coordinates to resolve, in order.
    pub coordinates: Vec<ArtifactCoordinates>,
    /// Local repository the request is scoped to.
    pub local_repository: PathBuf,
    /// Remote repositories overriding the resolver's own; `None` keeps its defaults.
    pub remote_repositories: Option<Vec<Url>>,
}

/// Resolves coordinates to dependencies with their transitive subtrees.
///
/// Implementations return one [`ResolvedDependency`] per requested
/// coordinate and fail the whole batch if any coordinate cannot be resolved.
pub trait DependencyResolver {
    fn resolve(&self, request: &ResolutionRequest) -> Result<Vec<ResolvedDependency>>;
}
