//! Shared-library propagation.
//!
//! A shared library is a dependency whose packages must be visible across the
//! application's classloader isolation boundary. Visibility extends to its
//! whole transitive closure: every artifact reachable from a nominated
//! library, at any depth, is flagged as shared in the packaged artifact list.
//!
//! Nominations come from the `sharedLibraries` configuration of the packaging
//! plugin ([`shared_libraries_from_model`]) or from packager configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use muledeps_cli::models::{ArtifactKey, to_application_model_artifacts};
//! use muledeps_cli::shared::propagate_shared_libraries;
//!
//! # fn example(resolved: Vec<muledeps_cli::models::ResolvedDependency>) {
//! let mut artifacts = to_application_model_artifacts(&resolved);
//! let nominated = vec![ArtifactKey::new("org.acme", "shared-lib")];
//! let marked = propagate_shared_libraries(&nominated, &resolved, &mut artifacts);
//! println!("{marked} artifacts marked as shared");
//! # }
//! ```

use std::collections::HashSet;
use tracing::{debug, info};

use crate::constants::{MULE_MAVEN_PLUGIN_ARTIFACT_ID, MULE_MAVEN_PLUGIN_GROUP_ID};
use crate::core::{MuleDepsError, Result};
use crate::metadata::{BuildModel, BuildPlugin, ConfigNode};
use crate::models::{Artifact, ArtifactCoordinates, ArtifactKey, ResolvedDependency};

const SHARED_LIBRARIES_ELEMENT: &str = "sharedLibraries";
const SHARED_LIBRARY_ELEMENT: &str = "sharedLibrary";
const GROUP_ID_ELEMENT: &str = "groupId";
const ARTIFACT_ID_ELEMENT: &str = "artifactId";

/// Flag as shared every artifact reachable from a nominated shared library.
///
/// Each nominated GA is looked up among the top-level resolved dependencies;
/// every match and its transitive subtree are walked depth-first, and any
/// artifact in `artifacts` sharing a walked GA is marked. A GA with no
/// counterpart in `artifacts` is skipped.
///
/// Flags are only ever set, so running twice yields the same result.
/// Returns the number of artifacts whose flag changed.
pub fn propagate_shared_libraries(
    shared_libraries: &[ArtifactKey],
    resolved_dependencies: &[ResolvedDependency],
    artifacts: &mut [Artifact],
) -> usize {
    let mut marked = 0;

    for library in shared_libraries {
        let roots: Vec<_> = resolved_dependencies
            .iter()
            .filter(|dependency| dependency.descriptor().has_key(library))
            .collect();
        if roots.is_empty() {
            debug!("Shared library {library} is not an application dependency");
        }
        for root in roots {
            marked += mark_subtree(root, artifacts, &mut HashSet::new());
        }
    }

    if marked > 0 {
        info!("Marked {marked} artifacts as shared");
    }
    marked
}

/// Walks every occurrence of a node, since equal coordinates may carry
/// different subtrees. `ancestors` only guards against a node repeating on
/// its own path.
fn mark_subtree<'a>(
    dependency: &'a ResolvedDependency,
    artifacts: &mut [Artifact],
    ancestors: &mut HashSet<&'a ArtifactCoordinates>,
) -> usize {
    if !ancestors.insert(dependency.descriptor()) {
        return 0;
    }

    let key = dependency.key();
    let mut marked = 0;
    for artifact in artifacts.iter_mut().filter(|artifact| artifact.coordinates().has_key(&key)) {
        if artifact.mark_shared() {
            debug!("Artifact {} is now shared", artifact.coordinates());
            marked += 1;
        }
    }

    for child in dependency.transitive_dependencies() {
        marked += mark_subtree(child, artifacts, ancestors);
    }
    ancestors.remove(dependency.descriptor());
    marked
}

/// Read shared-library nominations from an application build model.
///
/// The packaging plugin is looked up (ignoring case) in the main build and in
/// the build of every active profile. Each `sharedLibrary` entry must have
/// non-blank `groupId` and `artifactId` children; values are trimmed.
pub fn shared_libraries_from_model(
    model: &BuildModel,
    active_profiles: &[String],
) -> Result<Vec<ArtifactKey>> {
    let plugin = model
        .active_builds(active_profiles)
        .into_iter()
        .flat_map(|build| build.plugins.iter())
        .find(|plugin| is_packaging_plugin(plugin));

    let Some(entries) = plugin
        .and_then(|plugin| plugin.configuration.as_ref())
        .and_then(|configuration| configuration.child(SHARED_LIBRARIES_ELEMENT))
    else {
        return Ok(Vec::new());
    };

    entries
        .children_named(SHARED_LIBRARY_ELEMENT)
        .map(|entry| {
            Ok(ArtifactKey::new(
                attribute(entry, GROUP_ID_ELEMENT)?,
                attribute(entry, ARTIFACT_ID_ELEMENT)?,
            ))
        })
        .collect()
}

fn is_packaging_plugin(plugin: &BuildPlugin) -> bool {
    plugin.group_id.eq_ignore_ascii_case(MULE_MAVEN_PLUGIN_GROUP_ID)
        && plugin.artifact_id.eq_ignore_ascii_case(MULE_MAVEN_PLUGIN_ARTIFACT_ID)
}

fn attribute(entry: &ConfigNode, name: &str) -> Result<String> {
    let value = entry
        .child(name)
        .ok_or_else(|| MuleDepsError::declaration(name, entry))?
        .value()
        .unwrap_or_default()
        .trim();
    if value.is_empty() {
        return Err(MuleDepsError::declaration(name, entry));
    }
    Ok(value.to_string())
}
