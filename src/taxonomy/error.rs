//! Taxonomy error types

use thiserror::Error;

/// Errors raised when a caller needs taxonomy data that is not there
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// The one-shot taxonomy fetch failed; filters cannot be used until reload
    #[error("Filters unavailable: {0}")]
    Unavailable(String),

    /// A category slug that the loaded taxonomy does not know
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}
