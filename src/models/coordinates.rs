//! Artifact coordinates and GA keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_ARTIFACT_TYPE, MULE_PLUGIN_CLASSIFIER};

/// The (groupId, artifactId) pair identifying an artifact independent of version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactKey {
    /// Group id
    pub group_id: String,
    /// Artifact id
    pub artifact_id: String,
}

impl ArtifactKey {
    /// Create a new key.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Check whether this key names the given group and artifact.
    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

pub(crate) fn default_artifact_type() -> String {
    DEFAULT_ARTIFACT_TYPE.to_string()
}

/// Full identity of an artifact instance.
///
/// Coordinates are immutable once built. The `with_*` methods consume the value
/// and return an updated copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCoordinates {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(rename = "type", default = "default_artifact_type")]
    artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl ArtifactCoordinates {
    /// Create coordinates with the default artifact type and no classifier.
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
            scope: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Option<String>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The GA of these coordinates.
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(&self.group_id, &self.artifact_id)
    }

    /// Check whether these coordinates share the given GA.
    pub fn has_key(&self, key: &ArtifactKey) -> bool {
        key.matches(&self.group_id, &self.artifact_id)
    }

    /// Check whether these coordinates carry the given classifier.
    pub fn has_classifier(&self, classifier: &str) -> bool {
        self.classifier.as_deref() == Some(classifier)
    }

    /// Whether these coordinates identify a Mule extension plugin.
    pub fn is_mule_plugin(&self) -> bool {
        self.has_classifier(MULE_PLUGIN_CLASSIFIER)
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}
