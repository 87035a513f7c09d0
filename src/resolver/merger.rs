//! Merge additional-dependency declarations into one effective declaration per plugin.
//!
//! Declarations for the same plugin GA coming from several embedded build
//! models are folded together. Inside a plugin, two declarations conflict when
//! they share group, artifact, type and classifier; the newer version wins
//! (see [`VersionComparator::is_newer`]) and ties keep the declaration seen
//! first.
//!
//! Application-level declarations take precedence: an embedded declaration
//! for a plugin the application declares explicitly is dropped as a whole.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{ArtifactKey, DependencyDeclaration, PluginDeclaration};
use crate::version::VersionComparator;

/// Accumulates plugin declarations and folds conflicts as they arrive.
///
/// Insertion order of plugins and of dependencies inside a plugin is kept, so
/// merging the same inputs always yields the same output.
#[derive(Debug, Default)]
pub struct ConflictMerger {
    declarations: Vec<PluginDeclaration>,
    index: HashMap<ArtifactKey, usize>,
}

impl ConflictMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a declaration into the declaration already held for its plugin.
    pub fn add(&mut self, declaration: PluginDeclaration) {
        let key = declaration.key();
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.declarations.push(PluginDeclaration::new(
                    declaration.group_id.clone(),
                    declaration.artifact_id.clone(),
                    Vec::new(),
                ));
                self.index.insert(key, self.declarations.len() - 1);
                self.declarations.len() - 1
            }
        };

        let plugin = declaration.to_string();
        let effective = &mut self.declarations[position].additional_dependencies;
        for candidate in declaration.additional_dependencies {
            merge_dependency(&plugin, effective, candidate);
        }
    }

    /// The merged declarations, one per plugin, in first-seen order.
    pub fn into_declarations(self) -> Vec<PluginDeclaration> {
        self.declarations
    }
}

fn merge_dependency(
    plugin: &str,
    effective: &mut Vec<DependencyDeclaration>,
    candidate: DependencyDeclaration,
) {
    let key = candidate.conflict_key();
    match effective.iter_mut().find(|incumbent| incumbent.conflict_key() == key) {
        Some(incumbent) => {
            if VersionComparator::is_newer(&candidate.version, &incumbent.version) {
                debug!(
                    "Plugin {plugin}: {}:{} {} replaces {}",
                    candidate.group_id, candidate.artifact_id, candidate.version, incumbent.version
                );
                *incumbent = candidate;
            } else {
                debug!(
                    "Plugin {plugin}: keeping {}:{} {} over {}",
                    incumbent.group_id, incumbent.artifact_id, incumbent.version, candidate.version
                );
            }
        }
        None => effective.push(candidate),
    }
}

/// Combine application-level and embedded declarations into the effective set.
///
/// Application declarations come first (folded per plugin), followed by the
/// embedded declarations for plugins the application does not declare.
pub fn effective_declarations(
    application: &[PluginDeclaration],
    embedded: Vec<PluginDeclaration>,
) -> Vec<PluginDeclaration> {
    let redefined: HashSet<ArtifactKey> = application.iter().map(PluginDeclaration::key).collect();
    let mut merger = ConflictMerger::new();
    for declaration in application {
        merger.add(declaration.clone());
    }

    for declaration in embedded {
        if redefined.contains(&declaration.key()) {
            debug!(
                "Ignoring embedded declaration for {declaration}: redefined at application level"
            );
            continue;
        }
        merger.add(declaration);
    }

    merger.into_declarations()
}
