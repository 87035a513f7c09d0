//! The `share` command.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use url::Url;

use super::project::ProjectSnapshot;
use crate::config::PackagerConfig;
use crate::core::MuleDepsError;
use crate::metadata::{BuildModelReader, FileBuildModelReader};
use crate::models::{ArtifactKey, to_application_model_artifacts};
use crate::shared::{propagate_shared_libraries, shared_libraries_from_model};

/// Flag shared libraries and everything they pull in.
///
/// Nominations come from the packager configuration and, when `--model` is
/// given, from the `sharedLibraries` configuration of the application's build
/// model. Prints the application's artifact list as JSON.
#[derive(Args)]
pub struct ShareCommand {
    /// Project snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Application build model (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<PathBuf>,
}

impl ShareCommand {
    pub async fn execute(self, config: &PackagerConfig) -> Result<()> {
        let snapshot = ProjectSnapshot::load(&self.project).await?;

        let mut nominated: Vec<ArtifactKey> = config.shared_libraries.clone();
        if let Some(path) = &self.model {
            let model = FileBuildModelReader::new().build_model(&file_url(path)?)?;
            for library in shared_libraries_from_model(&model, &config.active_profiles)? {
                if !nominated.contains(&library) {
                    nominated.push(library);
                }
            }
        }

        let mut artifacts = to_application_model_artifacts(&snapshot.application_dependencies);
        propagate_shared_libraries(&nominated, &snapshot.application_dependencies, &mut artifacts);

        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        Ok(())
    }
}

fn file_url(path: &Path) -> Result<Url> {
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute).map_err(|()| {
        MuleDepsError::InvalidLocation {
            location: absolute.display().to_string(),
        }
        .into()
    })
}
