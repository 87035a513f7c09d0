//! The `resolve` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::project::ProjectSnapshot;
use crate::config::PackagerConfig;
use crate::metadata::FileBuildModelReader;
use crate::resolver::{AdditionalDependenciesResolver, IndexResolver, RepositoryIndex};

/// Compute the additional dependencies of every plugin in a project.
///
/// Embedded declarations are read from each plugin's build model document
/// (stored next to the plugin's content location) and merged with the
/// declarations in the packager configuration. Prints the plugin to
/// additional-dependencies mapping as JSON.
#[derive(Args)]
pub struct ResolveCommand {
    /// Project snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Repository index (JSON or TOML) to resolve against
    ///
    /// Without an index nothing can be resolved, so the run only succeeds
    /// when no plugin needs net-new dependencies.
    #[arg(short, long, value_name = "FILE")]
    pub index: Option<PathBuf>,
}

impl ResolveCommand {
    pub async fn execute(self, config: &PackagerConfig) -> Result<()> {
        let snapshot = ProjectSnapshot::load(&self.project).await?;
        let index = match &self.index {
            Some(path) => RepositoryIndex::load(path)
                .await
                .with_context(|| format!("Failed to load repository index {}", path.display()))?,
            None => RepositoryIndex::default(),
        };

        let resolver = IndexResolver::new(index);
        let reader = FileBuildModelReader::new();
        let additional = AdditionalDependenciesResolver::new(
            &resolver,
            &reader,
            config.additional_plugin_dependencies.clone(),
            config.local_repository()?,
        )
        .resolve_dependencies(&snapshot.application_dependencies, &snapshot.plugin_models)?;

        info!("Resolved additional dependencies for {} plugins", additional.len());
        println!("{}", serde_json::to_string_pretty(&additional)?);
        Ok(())
    }
}
