//! Declared and resolved dependencies.
//!
//! A [`DependencyDeclaration`] is an intent: coordinates somebody asked for,
//! not yet resolved. A [`ResolvedDependency`] is what the dependency resolver
//! hands back: concrete coordinates, where the content lives, and the
//! transitive subtree.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::coordinates::{ArtifactCoordinates, ArtifactKey, default_artifact_type};
use crate::core::{MuleDepsError, Result};

/// A resolved dependency together with its transitive subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDependency {
    descriptor: ArtifactCoordinates,
    content_location: Url,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    transitive_dependencies: Vec<ResolvedDependency>,
}

impl ResolvedDependency {
    /// Create a leaf dependency.
    pub fn new(descriptor: ArtifactCoordinates, content_location: Url) -> Self {
        Self {
            descriptor,
            content_location,
            transitive_dependencies: Vec::new(),
        }
    }

    /// Attach the transitive children, in resolution order.
    #[must_use]
    pub fn with_transitive_dependencies(mut self, children: Vec<ResolvedDependency>) -> Self {
        self.transitive_dependencies = children;
        self
    }

    pub fn descriptor(&self) -> &ArtifactCoordinates {
        &self.descriptor
    }

    pub fn content_location(&self) -> &Url {
        &self.content_location
    }

    pub fn transitive_dependencies(&self) -> &[ResolvedDependency] {
        &self.transitive_dependencies
    }

    /// The GA of the descriptor.
    pub fn key(&self) -> ArtifactKey {
        self.descriptor.key()
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor)
    }
}

/// Identity used to detect conflicting declarations: GA plus type and classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationKey {
    pub group_id: String,
    pub artifact_id: String,
    pub artifact_type: String,
    pub classifier: Option<String>,
}

/// A declared, not yet resolved, dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_path: Option<String>,
}

impl DependencyDeclaration {
    /// Create a declaration with the default type and no classifier.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: default_artifact_type(),
            classifier: None,
            system_path: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// The key two declarations must share to be in conflict.
    pub fn conflict_key(&self) -> DeclarationKey {
        DeclarationKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            artifact_type: self.artifact_type.clone(),
            classifier: self.classifier.clone(),
        }
    }

    /// Whether the coordinates name the same group, artifact and version.
    pub fn same_gav(&self, coordinates: &ArtifactCoordinates) -> bool {
        self.group_id == coordinates.group_id()
            && self.artifact_id == coordinates.artifact_id()
            && self.version == coordinates.version()
    }

    /// Convert to the coordinate form handed to the dependency resolver.
    pub fn to_coordinates(&self) -> ArtifactCoordinates {
        ArtifactCoordinates::new(&self.group_id, &self.artifact_id, &self.version)
            .with_type(&self.artifact_type)
            .with_classifier(self.classifier.clone())
    }

    /// Check the mandatory fields of a declaration that did not come from a build model.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("groupId", &self.group_id),
            ("artifactId", &self.artifact_id),
            ("version", &self.version),
        ] {
            if value.trim().is_empty() {
                return Err(MuleDepsError::declaration(field, self));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency[{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.artifact_type, self.version
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, " classifier={classifier}")?;
        }
        write!(f, "]")
    }
}

/// Additional dependencies declared for one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub additional_dependencies: Vec<DependencyDeclaration>,
}

impl PluginDeclaration {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        additional_dependencies: Vec<DependencyDeclaration>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            additional_dependencies,
        }
    }

    /// The GA of the plugin this declaration targets.
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(&self.group_id, &self.artifact_id)
    }

    /// Check the plugin GA and every declared dependency.
    pub fn validate(&self) -> Result<()> {
        if self.group_id.trim().is_empty() {
            return Err(MuleDepsError::declaration("groupId", self));
        }
        if self.artifact_id.trim().is_empty() {
            return Err(MuleDepsError::declaration("artifactId", self));
        }
        self.additional_dependencies.iter().try_for_each(DependencyDeclaration::validate)
    }
}

impl fmt::Display for PluginDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}
