//! Version comparison used to settle conflicting declarations.
//!
//! Two declared versions are compared as semantic versions when both parse,
//! and as plain strings otherwise. Parsing is loose: Maven-style versions
//! such as `1.0`, `v2` or `1.2-SNAPSHOT` are padded to three components
//! before being handed to [`semver`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use muledeps_cli::version::comparison::VersionComparator;
//!
//! assert!(VersionComparator::is_newer("1.1.0", "1.0.0"));
//! assert!(VersionComparator::is_newer("1.10", "1.9"));
//! // Not semver: falls back to string comparison
//! assert!(VersionComparator::is_newer("b-release", "a-release"));
//! // Equal versions never replace the incumbent
//! assert!(!VersionComparator::is_newer("1.0.0", "1.0"));
//! ```

use semver::Version;
use std::cmp::Ordering;

/// Version comparison utilities for declaration conflicts.
pub struct VersionComparator;

impl VersionComparator {
    /// Returns `true` when `candidate` is strictly newer than `incumbent`.
    ///
    /// Ties keep the incumbent, so this returns `false` for equal versions
    /// under whichever comparison applies.
    pub fn is_newer(candidate: &str, incumbent: &str) -> bool {
        Self::compare(candidate, incumbent) == Ordering::Greater
    }

    /// Compare two versions semantically, or lexicographically if either
    /// one is not a semantic version. Build metadata does not affect order.
    pub fn compare(a: &str, b: &str) -> Ordering {
        match (Self::parse_loose(a), Self::parse_loose(b)) {
            (Some(left), Some(right)) => left.cmp_precedence(&right),
            _ => a.cmp(b),
        }
    }

    /// Parse a version, accepting a `v` prefix and missing minor or patch numbers.
    pub fn parse_loose(version: &str) -> Option<Version> {
        let trimmed = version.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let split_at = clean.find(['-', '+']).unwrap_or(clean.len());
        let (core, suffix) = clean.split_at(split_at);

        let parts: Vec<&str> = core.split('.').collect();
        if parts.is_empty()
            || parts.len() > 3
            || parts.iter().any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()))
        {
            return None;
        }

        let mut padded = parts.join(".");
        for _ in parts.len()..3 {
            padded.push_str(".0");
        }
        padded.push_str(suffix);

        Version::parse(&padded).ok()
    }
}
