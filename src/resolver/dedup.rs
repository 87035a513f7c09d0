//! Drop declared additional dependencies a plugin already carries.

use tracing::debug;

use crate::models::{ClassLoaderModel, DependencyDeclaration};

/// Keep only the declarations whose group, artifact and version are not
/// already part of the plugin's own classloader model.
///
/// Type and classifier do not take part in the match.
pub fn net_new_dependencies(
    plugin_model: &ClassLoaderModel,
    declarations: &[DependencyDeclaration],
) -> Vec<DependencyDeclaration> {
    declarations
        .iter()
        .filter(|declaration| {
            let present = plugin_model.contains(declaration);
            if present {
                debug!(
                    "{}:{}:{} already present in {}, not adding it again",
                    declaration.group_id,
                    declaration.artifact_id,
                    declaration.version,
                    plugin_model.artifact_coordinates.key()
                );
            }
            !present
        })
        .cloned()
        .collect()
}
