//! Resolution of additional plugin dependencies.
//!
//! This is the orchestration layer of the run:
//!
//! 1. Every `mule-plugin` classified application dependency has its build
//!    model inspected for embedded declarations
//! 2. Embedded and application-level declarations are merged into one
//!    effective declaration per plugin (see [`super::merger`])
//! 3. For each plugin, declarations already satisfied by the plugin's own
//!    classloader model are dropped (see [`super::dedup`])
//! 4. What remains is resolved in a single batch request per plugin
//!
//! The run has no partial-success mode: the first error aborts it and no
//! mapping is returned.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::dedup::net_new_dependencies;
use super::merger::effective_declarations;
use super::{DependencyResolver, ResolutionRequest};
use crate::core::{MuleDepsError, Result};
use crate::metadata::{BuildModelReader, ExtractorVocabulary, PluginDeclarationExtractor};
use crate::models::{
    ArtifactKey, ClassLoaderModel, DependencyDeclaration, PluginDeclaration, ResolvedDependency,
};

/// The additional dependencies resolved for one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginAdditions {
    /// The plugin as resolved among the application dependencies.
    pub plugin: ResolvedDependency,
    /// Net-new dependencies to inject into the plugin's classloader model.
    pub additional_dependencies: Vec<ResolvedDependency>,
}

/// Mapping from plugin to the additional dependencies it needs.
///
/// Only plugins with at least one net-new dependency have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdditionalDependencies {
    entries: Vec<PluginAdditions>,
}

impl AdditionalDependencies {
    /// The additional dependencies resolved for a plugin GA.
    pub fn get(&self, plugin: &ArtifactKey) -> Option<&[ResolvedDependency]> {
        self.entries
            .iter()
            .find(|entry| entry.plugin.descriptor().has_key(plugin))
            .map(|entry| entry.additional_dependencies.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginAdditions> {
        self.entries.iter()
    }

    fn insert(&mut self, plugin: ResolvedDependency, additional_dependencies: Vec<ResolvedDependency>) {
        self.entries.push(PluginAdditions {
            plugin,
            additional_dependencies,
        });
    }
}

impl IntoIterator for AdditionalDependencies {
    type Item = PluginAdditions;
    type IntoIter = std::vec::IntoIter<PluginAdditions>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Resolves the additional dependencies of every plugin that has any.
pub struct AdditionalDependenciesResolver<'a> {
    resolver: &'a dyn DependencyResolver,
    reader: &'a dyn BuildModelReader,
    application_declarations: Vec<PluginDeclaration>,
    local_repository: PathBuf,
    vocabulary: ExtractorVocabulary,
}

impl<'a> AdditionalDependenciesResolver<'a> {
    /// Create a resolver.
    ///
    /// # Arguments
    ///
    /// * `resolver` - The dependency resolver used for batch requests
    /// * `reader` - Reads the build models of embedded plugins
    /// * `application_declarations` - Declarations made explicitly by the application
    /// * `local_repository` - Local repository every request is scoped to
    pub fn new(
        resolver: &'a dyn DependencyResolver,
        reader: &'a dyn BuildModelReader,
        application_declarations: Vec<PluginDeclaration>,
        local_repository: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            reader,
            application_declarations,
            local_repository: local_repository.into(),
            vocabulary: ExtractorVocabulary::default(),
        }
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: ExtractorVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Resolve additional dependencies for every plugin with an effective declaration.
    ///
    /// # Arguments
    ///
    /// * `application_dependencies` - The application's resolved dependencies
    /// * `plugin_models` - Classloader models already resolved for the application's plugins
    ///
    /// # Errors
    ///
    /// - [`MuleDepsError::DeclarationError`] for a malformed declaration
    /// - [`MuleDepsError::MetadataReadError`] if a plugin build model cannot be read
    /// - [`MuleDepsError::UndeclaredPlugin`] if a declaration targets a plugin the
    ///   application does not depend on
    /// - [`MuleDepsError::MissingClassLoaderModel`] if a plugin's classloader model
    ///   was not supplied
    /// - [`MuleDepsError::ResolutionError`] from the dependency resolver
    pub fn resolve_dependencies(
        &self,
        application_dependencies: &[ResolvedDependency],
        plugin_models: &[ClassLoaderModel],
    ) -> Result<AdditionalDependencies> {
        let declarations = self.effective_declarations(application_dependencies)?;
        let mut result = AdditionalDependencies::default();

        for declaration in &declarations {
            let key = declaration.key();
            let plugin = application_dependencies
                .iter()
                .find(|dependency| dependency.descriptor().has_key(&key))
                .ok_or_else(|| MuleDepsError::UndeclaredPlugin {
                    plugin: key.to_string(),
                })?;
            let plugin_model = plugin_models
                .iter()
                .find(|model| model.artifact_coordinates.has_key(&key))
                .ok_or_else(|| MuleDepsError::MissingClassLoaderModel {
                    plugin: key.to_string(),
                })?;

            let remaining = net_new_dependencies(plugin_model, &declaration.additional_dependencies);
            if remaining.is_empty() {
                debug!("Plugin {key} already carries all its additional dependencies");
                continue;
            }

            let resolved = self.resolve_batch(&remaining)?;
            if resolved.is_empty() {
                continue;
            }
            info!("Plugin {key} gets {} additional dependencies", resolved.len());
            result.insert(plugin.clone(), resolved);
        }

        Ok(result)
    }

    /// Merge embedded and application-level declarations.
    ///
    /// Every declaration is known before any resolution starts, so the
    /// application-level precedence is applied globally.
    pub fn effective_declarations(
        &self,
        application_dependencies: &[ResolvedDependency],
    ) -> Result<Vec<PluginDeclaration>> {
        self.application_declarations.iter().try_for_each(PluginDeclaration::validate)?;

        let extractor = PluginDeclarationExtractor::with_vocabulary(self.reader, self.vocabulary.clone());
        let mut embedded = Vec::new();
        for plugin in application_dependencies
            .iter()
            .filter(|dependency| dependency.descriptor().is_mule_plugin())
        {
            embedded.extend(extractor.extract(plugin)?);
        }

        Ok(effective_declarations(&self.application_declarations, embedded))
    }

    fn resolve_batch(&self, declarations: &[DependencyDeclaration]) -> Result<Vec<ResolvedDependency>> {
        let request = ResolutionRequest {
            coordinates: declarations.iter().map(DependencyDeclaration::to_coordinates).collect(),
            local_repository: self.local_repository.clone(),
            remote_repositories: None,
        };
        debug!(
            "Resolving {} additional dependencies against {}",
            request.coordinates.len(),
            request.local_repository.display()
        );
        self.resolver.resolve(&request)
    }
}
