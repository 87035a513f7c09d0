//! Packager configuration (`muledeps.toml`).
//!
//! The configuration carries what the surrounding packaging pipeline would
//! normally supply: where the local repository lives, which build profiles
//! are active, and the application-level declarations.
//!
//! # File Format
//!
//! ```toml
//! local_repository = "/home/me/.m2/repository"
//! active_profiles = ["ci"]
//!
//! [[additional_plugin_dependencies]]
//! groupId = "org.tests.plugins"
//! artifactId = "test.plugin"
//! additionalDependencies = [
//!     { groupId = "dep.en.den.cy.x", artifactId = "declaredPomDependencyX10", version = "1.1.0" },
//! ]
//!
//! [[shared_libraries]]
//! groupId = "org.acme"
//! artifactId = "shared-lib"
//! ```
//!
//! # Location
//!
//! 1. The path given with `--config`
//! 2. The `MULEDEPS_CONFIG` environment variable
//! 3. `muledeps.toml` in the working directory
//!
//! Only the last one may be absent, in which case defaults apply.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::core::MuleDepsError;
use crate::models::{ArtifactKey, PluginDeclaration};

/// Settings for one packaging run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagerConfig {
    /// Local repository resolution requests are scoped to.
    ///
    /// Defaults to `~/.m2/repository` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    /// Profiles whose builds are consulted for shared-library nominations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<String>,

    /// Additional dependencies declared explicitly by the application.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_plugin_dependencies: Vec<PluginDeclaration>,

    /// Shared libraries nominated in configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_libraries: Vec<ArtifactKey>,
}

impl PackagerConfig {
    /// Load the configuration, honoring the lookup order described in the module docs.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path).await;
        }
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Self::load_from(Path::new(&path)).await;
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path).await
        } else {
            tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate the configuration stored at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read packager config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| MuleDepsError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        config
            .validate()
            .with_context(|| format!("Invalid packager config {}", path.display()))?;
        Ok(config)
    }

    /// Check every declaration and nomination for missing fields.
    pub fn validate(&self) -> std::result::Result<(), MuleDepsError> {
        self.additional_plugin_dependencies.iter().try_for_each(PluginDeclaration::validate)?;
        for library in &self.shared_libraries {
            if library.group_id.trim().is_empty() {
                return Err(MuleDepsError::declaration("groupId", format!("sharedLibrary[{library}]")));
            }
            if library.artifact_id.trim().is_empty() {
                return Err(MuleDepsError::declaration(
                    "artifactId",
                    format!("sharedLibrary[{library}]"),
                ));
            }
        }
        Ok(())
    }

    /// The local repository, falling back to `~/.m2/repository`.
    pub fn local_repository(&self) -> Result<PathBuf> {
        if let Some(path) = &self.local_repository {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().ok_or_else(|| MuleDepsError::ConfigError {
            message: "Unable to determine home directory for the local repository".to_string(),
        })?;
        Ok(home.join(".m2").join("repository"))
    }
}
