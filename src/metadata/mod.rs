//! Build-model documents and the declarations mined from them.
//!
//! - [`model`] - The [`BuildModel`] document and its generic [`ConfigNode`] configuration tree
//! - [`reader`] - [`BuildModelReader`] implementations for files and in-memory models
//! - [`extractor`] - [`PluginDeclarationExtractor`], which finds additional-dependency
//!   declarations inside a plugin's build model

pub mod extractor;
pub mod model;
pub mod reader;

pub use extractor::{ExtractorVocabulary, PluginDeclarationExtractor};
pub use model::{Build, BuildModel, BuildPlugin, ConfigNode, Profile};
pub use reader::{BuildModelReader, FileBuildModelReader, StaticBuildModelReader};
