//! Global constants used throughout the muledeps codebase.
//!
//! This module contains the artifact classifiers, default artifact type and
//! environment variable names shared by several modules. Element names used
//! when reading build models live in
//! [`ExtractorVocabulary`](crate::metadata::ExtractorVocabulary).

/// Artifact type assumed when a declaration does not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Classifier reserved for Mule extension plugins.
///
/// Only application dependencies carrying this classifier are inspected for
/// embedded additional-dependency declarations.
pub const MULE_PLUGIN_CLASSIFIER: &str = "mule-plugin";

/// Classifier of Mule domain artifacts.
///
/// Domains are provided by the runtime, so they never carry a content location
/// inside the packaged application.
pub const MULE_DOMAIN_CLASSIFIER: &str = "mule-domain";

/// Scope assigned to artifacts supplied by the runtime.
pub const PROVIDED_SCOPE: &str = "provided";

/// Group id of the packaging plugin that owns shared-library nominations.
pub const MULE_MAVEN_PLUGIN_GROUP_ID: &str = "org.mule.tools.maven";

/// Artifact id of the packaging plugin that owns shared-library nominations.
pub const MULE_MAVEN_PLUGIN_ARTIFACT_ID: &str = "mule-maven-plugin";

/// Group id of the extensions build plugin.
pub const MULE_EXTENSIONS_PLUGIN_GROUP_ID: &str = "org.mule.runtime.plugins";

/// Artifact id of the extensions build plugin.
pub const MULE_EXTENSIONS_PLUGIN_ARTIFACT_ID: &str = "mule-extensions-maven-plugin";

/// Environment variable that points at the packager configuration file.
pub const CONFIG_PATH_ENV: &str = "MULEDEPS_CONFIG";

/// File name looked up in the working directory when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "muledeps.toml";

/// Suffix of the build-model document stored next to a packaged artifact.
pub const BUILD_MODEL_SUFFIX: &str = "model.json";
