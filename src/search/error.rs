//! Search-specific error types
//!
//! These errors come up while turning user input into a search: a tag slug
//! or preset id the vocabulary does not know. A failed search request is not
//! an error here; the pager reports it as a status.

use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// A tag slug given on the command line is not in the taxonomy
    #[error("Unknown tag '{0}'")]
    UnknownTag(String),

    /// No built-in preset has this id
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
