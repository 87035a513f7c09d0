//! Readers that turn an artifact's content location into its [`BuildModel`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

use super::model::BuildModel;
use crate::constants::BUILD_MODEL_SUFFIX;
use crate::core::{MuleDepsError, Result};

/// Access to the effective build model of a packaged artifact.
///
/// Implementations hand back the raw model; callers walk it directly.
pub trait BuildModelReader {
    /// Read the build model of the artifact stored at `location`.
    fn build_model(&self, location: &Url) -> Result<BuildModel>;
}

/// Reads build models stored as JSON or YAML documents on the local filesystem.
///
/// A location ending in `.json`, `.yaml` or `.yml` is read as is. Any other
/// location is mapped to the document stored next to it. A packaged archive
/// swaps its extension: `connector-1.0.0-mule-plugin.jar` reads
/// `connector-1.0.0-mule-plugin.model.json`. Anything else keeps its full
/// name, so an exploded `lib-1.0.0` reads `lib-1.0.0.model.json`.
#[derive(Debug, Clone, Default)]
pub struct FileBuildModelReader;

impl FileBuildModelReader {
    pub fn new() -> Self {
        Self
    }

    /// The document path for an artifact location.
    pub fn document_path(location: &Url) -> Result<PathBuf> {
        let path = location.to_file_path().map_err(|()| MuleDepsError::InvalidLocation {
            location: location.to_string(),
        })?;

        match extension(&path) {
            Some("json" | "yaml" | "yml") => Ok(path),
            Some(ext) if PACKAGED_EXTENSIONS.contains(&ext) => {
                Ok(path.with_extension(BUILD_MODEL_SUFFIX))
            }
            _ => {
                // Dots in an unpackaged name belong to the version
                let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                    return Err(MuleDepsError::InvalidLocation {
                        location: location.to_string(),
                    });
                };
                Ok(path.with_file_name(format!("{file_name}.{BUILD_MODEL_SUFFIX}")))
            }
        }
    }
}

const PACKAGED_EXTENSIONS: &[&str] = &["jar", "zip", "pom", "war"];

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

impl BuildModelReader for FileBuildModelReader {
    fn build_model(&self, location: &Url) -> Result<BuildModel> {
        let path = Self::document_path(location)?;
        tracing::trace!("Reading build model from {}", path.display());

        let content = std::fs::read_to_string(&path)
            .map_err(|e| MuleDepsError::metadata(location, format!("{}: {e}", path.display())))?;

        match extension(&path) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| MuleDepsError::metadata(location, e)),
            _ => serde_json::from_str(&content).map_err(|e| MuleDepsError::metadata(location, e)),
        }
    }
}

/// Serves build models from memory, keyed by content location.
///
/// Useful when models were already loaded by an earlier stage, and in tests.
/// An unknown location is a [`MuleDepsError::MetadataReadError`].
#[derive(Debug, Clone, Default)]
pub struct StaticBuildModelReader {
    models: HashMap<Url, BuildModel>,
}

impl StaticBuildModelReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the model for a location, replacing any previous one.
    pub fn insert(&mut self, location: Url, model: BuildModel) {
        self.models.insert(location, model);
    }

    #[must_use]
    pub fn with_model(mut self, location: Url, model: BuildModel) -> Self {
        self.insert(location, model);
        self
    }
}

impl BuildModelReader for StaticBuildModelReader {
    fn build_model(&self, location: &Url) -> Result<BuildModel> {
        self.models
            .get(location)
            .cloned()
            .ok_or_else(|| MuleDepsError::metadata(location, "no build model registered"))
    }
}
