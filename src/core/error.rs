//! Error handling for muledeps
//!
//! This module provides the error type shared by every resolution stage and the
//! user-friendly reporting used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors**: each fatal condition of the resolution run has
//!    its own [`MuleDepsError`] variant, so callers can match on the kind
//! 2. **No degraded mode**: every error aborts the whole operation; nothing is
//!    downgraded to a warning
//!
//! # Error Categories
//!
//! - **Declarations**: [`MuleDepsError::DeclarationError`] for missing or empty
//!   required fields on a declared dependency or shared library
//! - **Pipeline ordering**: [`MuleDepsError::UndeclaredPlugin`] and
//!   [`MuleDepsError::MissingClassLoaderModel`]
//! - **Collaborators**: [`MuleDepsError::ResolutionError`] from the dependency
//!   resolver and [`MuleDepsError::MetadataReadError`] from build-model readers
//! - **Ambient**: configuration, parsing, locations and I/O
//!
//! # Examples
//!
//! ```rust,no_run
//! use muledeps_cli::core::{MuleDepsError, user_friendly_error};
//!
//! let error = MuleDepsError::UndeclaredPlugin {
//!     plugin: "org.tests.plugins:test.plugin".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Shows the error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result alias used by the resolution core.
pub type Result<T> = std::result::Result<T, MuleDepsError>;

/// The main error type for muledeps operations.
///
/// Every variant carries enough context (plugin GA, field name, location) to
/// diagnose the failure without re-running the operation.
#[derive(Error, Debug)]
pub enum MuleDepsError {
    /// A required field of a declaration is absent or empty.
    ///
    /// # Fields
    /// - `field`: The element name that was expected (e.g. `artifactId`)
    /// - `element`: A rendering of the enclosing block
    #[error("Expecting child element '{field}' with a non-empty value in {element}")]
    DeclarationError {
        /// Name of the missing or empty field
        field: String,
        /// The enclosing element, rendered for diagnostics
        element: String,
    },

    /// Additional dependencies were declared for a plugin the application does not depend on.
    #[error("Declared additional dependencies for a plugin not present: {plugin}")]
    UndeclaredPlugin {
        /// The plugin GA (`groupId:artifactId`)
        plugin: String,
    },

    /// The plugin's own classloader model was not resolved before deduplication.
    ///
    /// This signals an ordering bug in the calling pipeline: the primary
    /// dependency set of a plugin must be known before its additional
    /// dependencies are resolved.
    #[error("Could not find ClassLoaderModel resolved for plugin: {plugin}")]
    MissingClassLoaderModel {
        /// The plugin GA (`groupId:artifactId`)
        plugin: String,
    },

    /// The dependency resolver failed for one or more coordinates.
    #[error("Failed to resolve {coordinates}: {reason}")]
    ResolutionError {
        /// The coordinates that could not be resolved
        coordinates: String,
        /// Why resolution failed
        reason: String,
    },

    /// A build-model document could not be read or parsed.
    #[error("Failed to read build model at {location}: {reason}")]
    MetadataReadError {
        /// Location of the artifact whose model was requested
        location: String,
        /// Why reading failed
        reason: String,
    },

    /// A content location is not usable (e.g. not a `file:` URL).
    #[error("Invalid content location: {location}")]
    InvalidLocation {
        /// The offending location
        location: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// An input document (snapshot, index) could not be parsed.
    #[error("Invalid {kind} file {file}: {reason}")]
    ParseError {
        /// What kind of document was being read
        kind: String,
        /// Path of the document
        file: String,
        /// Parser message
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MuleDepsError {
    /// Build a [`MuleDepsError::DeclarationError`] from anything printable.
    pub fn declaration(field: impl Into<String>, element: impl fmt::Display) -> Self {
        Self::DeclarationError {
            field: field.into(),
            element: element.to_string(),
        }
    }

    /// Build a [`MuleDepsError::MetadataReadError`].
    pub fn metadata(location: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::MetadataReadError {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`MuleDepsError::ResolutionError`].
    pub fn resolution(coordinates: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::ResolutionError {
            coordinates: coordinates.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Error wrapper carrying a suggestion and details for CLI display.
///
/// Suggestions are printed in green and details in yellow, below the error
/// message itself.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {:#}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// [`MuleDepsError`] variants anywhere in the error chain get a tailored
/// suggestion; TOML errors get syntax guidance; anything else is shown as is.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let kind = error.chain().find_map(|cause| cause.downcast_ref::<MuleDepsError>()).map(
        |e| match e {
            MuleDepsError::DeclarationError { .. } => (
                "Add the missing element with a non-empty value to the declaration",
                "groupId, artifactId and version are mandatory for every additional dependency",
            ),
            MuleDepsError::UndeclaredPlugin { .. } => (
                "Add the plugin as an application dependency or remove its additional dependencies",
                "Additional dependencies can only be declared for plugins the application depends on",
            ),
            MuleDepsError::MissingClassLoaderModel { .. } => (
                "Resolve the plugin classloader models before resolving additional dependencies",
                "Deduplication needs the plugin's own dependency set",
            ),
            MuleDepsError::ResolutionError { .. } => (
                "Check the coordinates and that the artifact is available in the local repository",
                "Resolution failures are not retried",
            ),
            MuleDepsError::MetadataReadError { .. } => (
                "Check that the plugin build model exists and is valid JSON or YAML",
                "Plugin build models are never skipped, a missing one could hide a required dependency",
            ),
            MuleDepsError::InvalidLocation { .. } => (
                "Use file: URLs for content locations",
                "Only local content locations can be read",
            ),
            MuleDepsError::ConfigError { .. } | MuleDepsError::ParseError { .. } => (
                "Check the syntax of the file named above",
                "Configuration is TOML, project snapshots are JSON",
            ),
            MuleDepsError::IoError(_) => (
                "Check that the file exists and is readable",
                "An input file could not be accessed",
            ),
        },
    );

    if let Some((suggestion, details)) = kind {
        return ErrorContext::new(error).with_suggestion(suggestion).with_details(details);
    }

    if error.chain().any(|cause| cause.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in your muledeps.toml file")
            .with_details("TOML parsing errors are usually caused by missing quotes or mismatched brackets");
    }

    ErrorContext::new(error)
}
