//! Test utilities for muledeps
//!
//! Fixture builders for coordinates, resolved dependencies, classloader models
//! and build models, plus [`RecordingResolver`], an in-memory
//! [`DependencyResolver`] that records every request it receives.
//!
//! # Example
//!
//! ```rust,no_run
//! use muledeps_cli::metadata::StaticBuildModelReader;
//! use muledeps_cli::resolver::AdditionalDependenciesResolver;
//! use muledeps_cli::test_utils::{RecordingResolver, classloader_model, plugin_dependency};
//!
//! let plugin = plugin_dependency("org.tests.plugins", "test.plugin", "1.0.0");
//! let model = classloader_model(&plugin, &[]);
//! let resolver = RecordingResolver::new();
//! let reader = StaticBuildModelReader::new();
//! let result = AdditionalDependenciesResolver::new(&resolver, &reader, Vec::new(), "/repo")
//!     .resolve_dependencies(&[plugin], &[model]);
//! ```

use std::collections::HashSet;
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::constants::{MULE_MAVEN_PLUGIN_ARTIFACT_ID, MULE_MAVEN_PLUGIN_GROUP_ID, MULE_PLUGIN_CLASSIFIER};
use crate::core::{MuleDepsError, Result};
use crate::metadata::{Build, BuildModel, BuildPlugin, ConfigNode};
use crate::models::{
    Artifact, ArtifactCoordinates, ClassLoaderModel, DependencyDeclaration, PluginDeclaration,
    ResolvedDependency,
};
use crate::resolver::layout::RepositoryLayout;
use crate::resolver::{DependencyResolver, ResolutionRequest};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses the given level, or `RUST_LOG` when `level` is `None`. Without either,
/// logging stays off. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Root of the fictitious repository fixture locations point into.
pub const FIXTURE_REPOSITORY: &str = "/repository";

fn fixture_location(coordinates: &ArtifactCoordinates) -> Url {
    let path = RepositoryLayout::new(FIXTURE_REPOSITORY).artifact_path(coordinates);
    Url::parse(&format!("file://{}", path.to_string_lossy().replace('\\', "/")))
        .unwrap_or_else(|e| panic!("invalid fixture location for {coordinates}: {e}"))
}

/// Coordinates of a `mule-plugin` classified artifact.
pub fn plugin_coordinates(group_id: &str, artifact_id: &str, version: &str) -> ArtifactCoordinates {
    ArtifactCoordinates::new(group_id, artifact_id, version)
        .with_classifier(Some(MULE_PLUGIN_CLASSIFIER.to_string()))
}

/// A resolved `mule-plugin` with no transitive dependencies.
pub fn plugin_dependency(group_id: &str, artifact_id: &str, version: &str) -> ResolvedDependency {
    let coordinates = plugin_coordinates(group_id, artifact_id, version);
    let location = fixture_location(&coordinates);
    ResolvedDependency::new(coordinates, location)
}

/// A resolved plain jar with no transitive dependencies.
pub fn library_dependency(group_id: &str, artifact_id: &str, version: &str) -> ResolvedDependency {
    let coordinates = ArtifactCoordinates::new(group_id, artifact_id, version);
    let location = fixture_location(&coordinates);
    ResolvedDependency::new(coordinates, location)
}

/// A packaged jar artifact.
pub fn artifact(group_id: &str, artifact_id: &str, version: &str) -> Artifact {
    Artifact::from_resolved(&library_dependency(group_id, artifact_id, version))
}

/// The classloader model of `plugin`, carrying the given `(group, artifact, version)` jars.
pub fn classloader_model(plugin: &ResolvedDependency, dependencies: &[(&str, &str, &str)]) -> ClassLoaderModel {
    ClassLoaderModel::new(
        plugin.descriptor().clone(),
        dependencies
            .iter()
            .map(|(group_id, artifact_id, version)| artifact(group_id, artifact_id, version))
            .collect(),
    )
}

/// A jar dependency declaration.
pub fn declaration(group_id: &str, artifact_id: &str, version: &str) -> DependencyDeclaration {
    DependencyDeclaration::new(group_id, artifact_id, version)
}

/// A build model whose `mule-maven-plugin` configuration embeds the given declarations.
pub fn build_model_with_additional_dependencies(declarations: &[PluginDeclaration]) -> BuildModel {
    let mut block = ConfigNode::new("additionalPluginDependencies");
    for plugin in declarations {
        let mut dependencies = ConfigNode::new("additionalDependencies");
        for dependency in &plugin.additional_dependencies {
            dependencies.children.push(dependency_node(dependency));
        }
        block.children.push(
            ConfigNode::new("plugin")
                .with_child(ConfigNode::leaf("groupId", &plugin.group_id))
                .with_child(ConfigNode::leaf("artifactId", &plugin.artifact_id))
                .with_child(dependencies),
        );
    }

    BuildModel {
        build: Some(Build {
            plugins: vec![
                BuildPlugin::new(MULE_MAVEN_PLUGIN_GROUP_ID, MULE_MAVEN_PLUGIN_ARTIFACT_ID)
                    .with_configuration(ConfigNode::new("configuration").with_child(block)),
            ],
        }),
        ..BuildModel::default()
    }
}

fn dependency_node(dependency: &DependencyDeclaration) -> ConfigNode {
    let mut node = ConfigNode::new("dependency")
        .with_child(ConfigNode::leaf("groupId", &dependency.group_id))
        .with_child(ConfigNode::leaf("artifactId", &dependency.artifact_id))
        .with_child(ConfigNode::leaf("version", &dependency.version))
        .with_child(ConfigNode::leaf("type", &dependency.artifact_type));
    if let Some(classifier) = &dependency.classifier {
        node = node.with_child(ConfigNode::leaf("classifier", classifier));
    }
    if let Some(system_path) = &dependency.system_path {
        node = node.with_child(ConfigNode::leaf("systemPath", system_path));
    }
    node
}

/// A resolver that echoes every requested coordinate as a resolved leaf.
///
/// Requests are recorded in order so tests can assert on batching. Artifact
/// ids registered with [`RecordingResolver::failing_on`] make the whole batch
/// fail with [`MuleDepsError::ResolutionError`].
#[derive(Debug, Default)]
pub struct RecordingResolver {
    requests: Mutex<Vec<ResolutionRequest>>,
    failing: HashSet<String>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_on(mut self, artifact_id: impl Into<String>) -> Self {
        self.failing.insert(artifact_id.into());
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<ResolutionRequest> {
        self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
    }
}

impl DependencyResolver for RecordingResolver {
    fn resolve(&self, request: &ResolutionRequest) -> Result<Vec<ResolvedDependency>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        request
            .coordinates
            .iter()
            .map(|coordinates| {
                if self.failing.contains(coordinates.artifact_id()) {
                    return Err(MuleDepsError::resolution(coordinates, "artifact not available"));
                }
                let location = fixture_location(coordinates);
                Ok(ResolvedDependency::new(coordinates.clone(), location))
            })
            .collect()
    }
}
