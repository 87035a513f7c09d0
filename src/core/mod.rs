//! Core types for muledeps
//!
//! This module holds the error type every resolution stage returns. Each
//! fatal condition of a run has its own [`MuleDepsError`] variant, and the
//! CLI turns any error into an [`ErrorContext`] with a suggestion through
//! [`user_friendly_error`].

pub mod error;

pub use error::{ErrorContext, MuleDepsError, Result, user_friendly_error};
