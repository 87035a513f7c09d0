//! Command-line interface for muledeps.
//!
//! # Available Commands
//!
//! - `resolve` - Compute the additional dependencies of every plugin in a project
//! - `share` - Flag shared libraries and their transitive closure in the
//!   application's artifact list
//!
//! Both commands read a project snapshot (see [`ProjectSnapshot`]) and print
//! their result to stdout as JSON. Logs go to stderr.
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Disable logging
//! - `--config` - Path to the packager configuration file
//!
//! # Example
//!
//! ```bash
//! muledeps resolve --project target/project.json --index repository-index.json
//! muledeps share --project target/project.json --model pom.json --verbose
//! ```

mod project;
mod resolve;
mod share;

pub use project::ProjectSnapshot;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::PackagerConfig;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level passed to the subscriber. `None` disables logging.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub log_level: Option<String>,

    /// Explicit packager configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Install the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(format!("muledeps_cli={level},muledeps={level}"))
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the packager configuration this run uses.
    pub async fn load_packager_config(&self) -> Result<PackagerConfig> {
        PackagerConfig::load(self.config_path.as_deref()).await
    }
}

#[derive(Parser)]
#[command(
    name = "muledeps",
    about = "Resolve additional plugin dependencies and shared libraries for Mule applications",
    version,
    long_about = "muledeps computes the additional dependencies each Mule plugin needs at runtime \
                  and propagates shared-library visibility across the application's artifacts."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the packager configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the additional dependencies of every plugin
    Resolve(resolve::ResolveCommand),

    /// Propagate shared-library flags through the application's artifacts
    Share(share::ShareCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let packager = config.load_packager_config().await?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&packager).await,
            Commands::Share(cmd) => cmd.execute(&packager).await,
        }
    }
}
