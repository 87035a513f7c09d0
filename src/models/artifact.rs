//! Packaged artifacts and classloader models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

use super::coordinates::ArtifactCoordinates;
use super::dependency::{DependencyDeclaration, ResolvedDependency};
use crate::constants::{MULE_DOMAIN_CLASSIFIER, PROVIDED_SCOPE};

/// An artifact as it appears in a packaged classloader model.
///
/// The `shared` flag only ever goes from `false` to `true`; see
/// [`Artifact::mark_shared`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    coordinates: ArtifactCoordinates,
    /// Where the content lives. `None` for runtime-provided artifacts such as domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_location: Option<Url>,
    #[serde(default)]
    shared: bool,
    /// Java packages exported by the artifact.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub packages: BTreeSet<String>,
    /// Resources bundled in the artifact.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub resources: BTreeSet<String>,
}

impl Artifact {
    pub fn new(coordinates: ArtifactCoordinates, content_location: Option<Url>) -> Self {
        Self {
            coordinates,
            content_location,
            shared: false,
            packages: BTreeSet::new(),
            resources: BTreeSet::new(),
        }
    }

    /// Convert a resolved dependency, dropping its transitive subtree.
    pub fn from_resolved(dependency: &ResolvedDependency) -> Self {
        Self::new(dependency.descriptor().clone(), Some(dependency.content_location().clone()))
    }

    pub fn coordinates(&self) -> &ArtifactCoordinates {
        &self.coordinates
    }

    pub fn content_location(&self) -> Option<&Url> {
        self.content_location.as_ref()
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Flag the artifact as shared. Returns `true` if the flag changed.
    pub fn mark_shared(&mut self) -> bool {
        let changed = !self.shared;
        self.shared = true;
        changed
    }

    /// Domains are provided by the runtime: scope `provided` and no content location.
    fn update_scope_if_domain(mut self) -> Self {
        if self.coordinates.has_classifier(MULE_DOMAIN_CLASSIFIER) {
            self.coordinates = self.coordinates.with_scope(PROVIDED_SCOPE);
            self.content_location = None;
        }
        self
    }
}

/// Convert the application's resolved dependencies into the artifacts of its
/// classloader model.
pub fn to_application_model_artifacts(dependencies: &[ResolvedDependency]) -> Vec<Artifact> {
    dependencies
        .iter()
        .map(|dependency| Artifact::from_resolved(dependency).update_scope_if_domain())
        .collect()
}

/// The resolved dependency set of one artifact (application or plugin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLoaderModel {
    pub artifact_coordinates: ArtifactCoordinates,
    #[serde(default)]
    pub dependencies: Vec<Artifact>,
}

impl ClassLoaderModel {
    pub fn new(artifact_coordinates: ArtifactCoordinates, dependencies: Vec<Artifact>) -> Self {
        Self {
            artifact_coordinates,
            dependencies,
        }
    }

    /// Whether the model already carries the declaration's group, artifact and version.
    pub fn contains(&self, declaration: &DependencyDeclaration) -> bool {
        self.dependencies
            .iter()
            .any(|artifact| declaration.same_gav(artifact.coordinates()))
    }
}
