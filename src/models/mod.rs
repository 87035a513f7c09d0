//! Shared data models for muledeps operations
//!
//! This module provides the value types every stage of the resolution run
//! passes around: artifact coordinates, declared and resolved dependencies,
//! packaged artifacts and classloader models.
//!
//! # Identity
//!
//! For conflict detection and lookups, an artifact's identity is its GA
//! (`groupId:artifactId`), represented by [`ArtifactKey`]. Version, type and
//! classifier are attributes. Lookups use [`ArtifactKey`] as a composite key
//! instead of concatenated strings.

pub mod artifact;
pub mod coordinates;
pub mod dependency;

pub use artifact::{Artifact, ClassLoaderModel, to_application_model_artifacts};
pub use coordinates::{ArtifactCoordinates, ArtifactKey};
pub use dependency::{
    DeclarationKey, DependencyDeclaration, PluginDeclaration, ResolvedDependency,
};
