//! Extract additional-dependency declarations from plugin build models.
//!
//! A plugin author may declare, inside the configuration of one of the
//! recognized packaging plugins, dependencies that some plugin needs on top of
//! its own. The configuration shape is:
//!
//! ```text
//! additionalPluginDependencies
//! └── plugin*                   (groupId, artifactId required)
//!     └── additionalDependencies
//!         └── dependency*       (groupId, artifactId, version required;
//!                                type, classifier, systemPath optional)
//! ```
//!
//! Recognized packaging plugins are checked in priority order and the first
//! one present in the build wins, even if its configuration holds no
//! declarations.

use tracing::debug;

use super::model::{BuildModel, BuildPlugin, ConfigNode};
use super::reader::BuildModelReader;
use crate::constants::{
    DEFAULT_ARTIFACT_TYPE, MULE_EXTENSIONS_PLUGIN_ARTIFACT_ID, MULE_EXTENSIONS_PLUGIN_GROUP_ID,
    MULE_MAVEN_PLUGIN_ARTIFACT_ID, MULE_MAVEN_PLUGIN_GROUP_ID,
};
use crate::core::{MuleDepsError, Result};
use crate::models::{ArtifactKey, DependencyDeclaration, PluginDeclaration, ResolvedDependency};

/// Plugin coordinates and element names the extractor looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorVocabulary {
    /// Packaging plugins holding the declarations, highest priority first.
    pub packaging_plugins: Vec<ArtifactKey>,
    pub additional_plugin_dependencies: String,
    pub plugin: String,
    pub additional_dependencies: String,
    pub dependency: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact_type: String,
    pub classifier: String,
    pub system_path: String,
}

impl Default for ExtractorVocabulary {
    fn default() -> Self {
        Self {
            packaging_plugins: vec![
                ArtifactKey::new(MULE_EXTENSIONS_PLUGIN_GROUP_ID, MULE_EXTENSIONS_PLUGIN_ARTIFACT_ID),
                ArtifactKey::new(MULE_MAVEN_PLUGIN_GROUP_ID, MULE_MAVEN_PLUGIN_ARTIFACT_ID),
            ],
            additional_plugin_dependencies: "additionalPluginDependencies".to_string(),
            plugin: "plugin".to_string(),
            additional_dependencies: "additionalDependencies".to_string(),
            dependency: "dependency".to_string(),
            group_id: "groupId".to_string(),
            artifact_id: "artifactId".to_string(),
            version: "version".to_string(),
            artifact_type: "type".to_string(),
            classifier: "classifier".to_string(),
            system_path: "systemPath".to_string(),
        }
    }
}

/// Extracts [`PluginDeclaration`]s from the build models of embedded plugins.
pub struct PluginDeclarationExtractor<'a> {
    reader: &'a dyn BuildModelReader,
    vocabulary: ExtractorVocabulary,
}

impl<'a> PluginDeclarationExtractor<'a> {
    pub fn new(reader: &'a dyn BuildModelReader) -> Self {
        Self::with_vocabulary(reader, ExtractorVocabulary::default())
    }

    pub fn with_vocabulary(reader: &'a dyn BuildModelReader, vocabulary: ExtractorVocabulary) -> Self {
        Self { reader, vocabulary }
    }

    /// Read the plugin's build model and extract the declarations it carries.
    ///
    /// Returns one declaration per `plugin` entry, in document order. Plugins
    /// without a recognized packaging plugin or without configuration yield
    /// nothing.
    pub fn extract(&self, plugin: &ResolvedDependency) -> Result<Vec<PluginDeclaration>> {
        let model = self.reader.build_model(plugin.content_location())?;
        let declarations = self.extract_from_model(&model)?;
        debug!(
            "Plugin {} declares additional dependencies for {} plugin(s)",
            plugin.key(),
            declarations.len()
        );
        Ok(declarations)
    }

    /// Extract declarations from an already loaded build model.
    pub fn extract_from_model(&self, model: &BuildModel) -> Result<Vec<PluginDeclaration>> {
        let Some(packaging_plugin) = self.packaging_plugin(model) else {
            return Ok(Vec::new());
        };
        let Some(block) = packaging_plugin
            .configuration
            .as_ref()
            .and_then(|configuration| configuration.child(&self.vocabulary.additional_plugin_dependencies))
        else {
            return Ok(Vec::new());
        };

        let mut declarations = Vec::new();
        for entry in block.children_named(&self.vocabulary.plugin) {
            if let Some(declaration) = self.plugin_entry(entry)? {
                declarations.push(declaration);
            }
        }
        Ok(declarations)
    }

    fn packaging_plugin<'m>(&self, model: &'m BuildModel) -> Option<&'m BuildPlugin> {
        let build = model.build.as_ref()?;
        self.vocabulary.packaging_plugins.iter().find_map(|key| build.plugin(key))
    }

    fn plugin_entry(&self, entry: &ConfigNode) -> Result<Option<PluginDeclaration>> {
        let group_id = required(entry, &self.vocabulary.group_id)?;
        let artifact_id = required(entry, &self.vocabulary.artifact_id)?;

        let Some(dependencies) = entry.child(&self.vocabulary.additional_dependencies) else {
            debug!("Skipping {group_id}:{artifact_id}: no additional dependencies block");
            return Ok(None);
        };

        let additional_dependencies = dependencies
            .children_named(&self.vocabulary.dependency)
            .map(|dependency| self.dependency_entry(dependency))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(PluginDeclaration::new(group_id, artifact_id, additional_dependencies)))
    }

    fn dependency_entry(&self, entry: &ConfigNode) -> Result<DependencyDeclaration> {
        Ok(DependencyDeclaration {
            group_id: required(entry, &self.vocabulary.group_id)?,
            artifact_id: required(entry, &self.vocabulary.artifact_id)?,
            version: required(entry, &self.vocabulary.version)?,
            artifact_type: optional(entry, &self.vocabulary.artifact_type)
                .unwrap_or_else(|| DEFAULT_ARTIFACT_TYPE.to_string()),
            classifier: optional(entry, &self.vocabulary.classifier),
            system_path: optional(entry, &self.vocabulary.system_path),
        })
    }
}

fn required(element: &ConfigNode, name: &str) -> Result<String> {
    optional(element, name).ok_or_else(|| MuleDepsError::declaration(name, element))
}

fn optional(element: &ConfigNode, name: &str) -> Option<String> {
    element
        .child(name)
        .and_then(ConfigNode::value)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
