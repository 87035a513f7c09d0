//! A [`DependencyResolver`] backed by a repository index.
//!
//! The index lists known artifacts and their direct dependencies. Resolving a
//! coordinate walks the index to build the transitive tree; content
//! locations point into the request's local repository following
//! [`RepositoryLayout`]. Nothing is downloaded: the index is the whole
//! universe of resolvable artifacts.
//!
//! # Index Format
//!
//! ```json
//! {
//!   "artifacts": [
//!     {
//!       "coordinates": {"groupId": "g", "artifactId": "a", "version": "1.0.0"},
//!       "dependencies": [{"groupId": "g", "artifactId": "b", "version": "2.0.0"}]
//!     },
//!     {"coordinates": {"groupId": "g", "artifactId": "b", "version": "2.0.0"}}
//!   ]
//! }
//! ```
//!
//! TOML with the same structure (`[[artifacts]]` tables) is accepted too.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::trace;
use url::Url;

use super::layout::RepositoryLayout;
use super::{DependencyResolver, ResolutionRequest};
use crate::core::{MuleDepsError, Result};
use crate::models::{ArtifactCoordinates, ResolvedDependency};

/// One known artifact and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub coordinates: ArtifactCoordinates,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ArtifactCoordinates>,
}

/// The set of artifacts an [`IndexResolver`] can resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIndex {
    #[serde(default)]
    pub artifacts: Vec<IndexEntry>,
}

impl RepositoryIndex {
    /// Load an index from a JSON or TOML file, chosen by extension.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let parse_error = |reason: String| MuleDepsError::ParseError {
            kind: "repository index".to_string(),
            file: path.display().to_string(),
            reason,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            _ => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Register an artifact with its direct dependencies.
    #[must_use]
    pub fn with_artifact(
        mut self,
        coordinates: ArtifactCoordinates,
        dependencies: Vec<ArtifactCoordinates>,
    ) -> Self {
        self.artifacts.push(IndexEntry {
            coordinates,
            dependencies,
        });
        self
    }
}

type LookupKey = (String, String, String, String, Option<String>);

fn lookup_key(coordinates: &ArtifactCoordinates) -> LookupKey {
    (
        coordinates.group_id().to_string(),
        coordinates.artifact_id().to_string(),
        coordinates.version().to_string(),
        coordinates.artifact_type().to_string(),
        coordinates.classifier().map(str::to_string),
    )
}

/// Resolves coordinates against a [`RepositoryIndex`].
#[derive(Debug, Clone)]
pub struct IndexResolver {
    entries: HashMap<LookupKey, IndexEntry>,
}

impl IndexResolver {
    pub fn new(index: RepositoryIndex) -> Self {
        let entries = index
            .artifacts
            .into_iter()
            .map(|entry| (lookup_key(&entry.coordinates), entry))
            .collect();
        Self { entries }
    }

    fn resolve_one(
        &self,
        coordinates: &ArtifactCoordinates,
        layout: &RepositoryLayout,
        path: &mut HashSet<LookupKey>,
    ) -> Result<ResolvedDependency> {
        let key = lookup_key(coordinates);
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| MuleDepsError::resolution(coordinates, "artifact not found in repository index"))?;

        if !path.insert(key.clone()) {
            return Err(MuleDepsError::resolution(coordinates, "dependency cycle in repository index"));
        }

        let children = entry
            .dependencies
            .iter()
            .map(|child| self.resolve_one(child, layout, path))
            .collect::<Result<Vec<_>>>()?;
        path.remove(&key);

        let file = layout.artifact_path(&entry.coordinates);
        let location = Url::from_file_path(&file).map_err(|()| MuleDepsError::InvalidLocation {
            location: file.display().to_string(),
        })?;
        trace!("Resolved {} to {}", entry.coordinates, location);

        Ok(ResolvedDependency::new(entry.coordinates.clone(), location)
            .with_transitive_dependencies(children))
    }
}

impl DependencyResolver for IndexResolver {
    fn resolve(&self, request: &ResolutionRequest) -> Result<Vec<ResolvedDependency>> {
        let layout = RepositoryLayout::new(std::path::absolute(&request.local_repository)?);
        request
            .coordinates
            .iter()
            .map(|coordinates| self.resolve_one(coordinates, &layout, &mut HashSet::new()))
            .collect()
    }
}
