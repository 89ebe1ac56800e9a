//! Bookvault - filter state and taxonomy layer for the romance-book Vault
//!
//! This library keeps the reader's search criteria in a shareable query
//! string, resolves tag ids against the live taxonomy, composes search
//! requests, and pages through results without letting slow responses
//! overwrite newer ones.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod output;
pub mod presets;
pub mod search;
pub mod share;
pub mod taxonomy;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum VaultError {
    /// Vault API error
    #[error("API error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Taxonomy could not be loaded; filters are unusable
    #[error("{0}")]
    TaxonomyError(#[from] taxonomy::TaxonomyError),
    /// Search error
    #[error("{0}")]
    SearchError(#[from] search::SearchError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
}
