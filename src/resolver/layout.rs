//! Local repository layout.
//!
//! Artifacts live under `<root>/<group path>/<artifactId>/<version>/`, where
//! the group path is the group id with dots turned into directories, and the
//! file is named `<artifactId>-<version>[-<classifier>].<type>`. Timestamped
//! snapshot versions are normalized back to `-SNAPSHOT` for the directory.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::models::ArtifactCoordinates;

static TIMESTAMPED_SNAPSHOT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.*)-(\d{8}\.\d{6})-(\d+)$").ok());

/// Maps coordinates to locations inside a local repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    root: PathBuf,
}

impl RepositoryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The base version of a possibly timestamped snapshot.
    ///
    /// `1.0.0-20100101.101010-1` becomes `1.0.0-SNAPSHOT`; anything else is
    /// returned unchanged.
    pub fn normalized_version(version: &str) -> String {
        match TIMESTAMPED_SNAPSHOT.as_ref().and_then(|pattern| pattern.captures(version)) {
            Some(captures) => format!("{}-SNAPSHOT", &captures[1]),
            None => version.to_string(),
        }
    }

    /// Directory holding every file of the artifact's version.
    pub fn directory(&self, coordinates: &ArtifactCoordinates) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(coordinates.group_id().split('.'));
        path.push(coordinates.artifact_id());
        path.push(Self::normalized_version(coordinates.version()));
        path
    }

    /// File name of the artifact inside its directory.
    pub fn file_name(coordinates: &ArtifactCoordinates) -> String {
        let mut name = format!("{}-{}", coordinates.artifact_id(), coordinates.version());
        if let Some(classifier) = coordinates.classifier() {
            name.push('-');
            name.push_str(classifier);
        }
        name.push('.');
        name.push_str(coordinates.artifact_type());
        name
    }

    /// Full path of the artifact file.
    pub fn artifact_path(&self, coordinates: &ArtifactCoordinates) -> PathBuf {
        self.directory(coordinates).join(Self::file_name(coordinates))
    }
}
