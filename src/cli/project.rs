//! Project snapshots consumed by the commands.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::MuleDepsError;
use crate::models::{ClassLoaderModel, ResolvedDependency};

/// What the packaging pipeline knows about a project before additional
/// dependencies are computed.
///
/// ```json
/// {
///   "applicationDependencies": [
///     {
///       "descriptor": {"groupId": "org.tests.plugins", "artifactId": "test.plugin",
///                      "version": "1.0.0", "classifier": "mule-plugin"},
///       "contentLocation": "file:///repo/test.plugin-1.0.0-mule-plugin.jar"
///     }
///   ],
///   "pluginModels": [
///     {
///       "artifactCoordinates": {"groupId": "org.tests.plugins", "artifactId": "test.plugin",
///                               "version": "1.0.0", "classifier": "mule-plugin"},
///       "dependencies": []
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub application_dependencies: Vec<ResolvedDependency>,
    #[serde(default)]
    pub plugin_models: Vec<ClassLoaderModel>,
}

impl ProjectSnapshot {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read project snapshot {}", path.display()))?;

        let snapshot = serde_json::from_str(&content).map_err(|e| MuleDepsError::ParseError {
            kind: "project snapshot".to_string(),
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(snapshot)
    }
}
