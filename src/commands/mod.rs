//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against the Vault API. Commands that work on a
//! search start from a Vault URL (or bare query string) and print the updated
//! shareable URL.

pub mod book;
pub mod config;
pub mod member;
pub mod presets;
pub mod search;
pub mod share;
pub mod tags;

pub use book::execute as book;
pub use config::execute as config;
pub use search::execute as search;
pub use share::execute as share;
pub use tags::execute as tags;

use crate::api::VaultApi;
use crate::config::VaultConfig;
use crate::filters::{FilterState, FilterStore, MemoryLocation, query_string};
use crate::output::OutputWriter;
use crate::search::SearchError;
use crate::taxonomy::{Tag, TaxonomyCache};
use crate::{VaultError, share as share_text};

type Result<T> = std::result::Result<T, VaultError>;

/// What every command needs besides its own arguments
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a VaultConfig,
    pub out: &'a dyn OutputWriter,
    pub quiet: bool,
}

/// Load the taxonomy, failing if it is unavailable
///
/// # Errors
///
/// Returns `VaultError::TaxonomyError` when the fetch failed. Commands that
/// filter by tag cannot continue without it.
pub fn load_taxonomy<A: VaultApi + ?Sized>(api: &A, ctx: &Context<'_>) -> Result<TaxonomyCache> {
    let taxonomy = TaxonomyCache::load(api, ctx.config.include_sensitive);
    taxonomy.require_loaded()?;
    Ok(taxonomy)
}

/// Store seeded from a pasted Vault URL or query string
#[must_use]
pub fn store_from_input(input: Option<&str>) -> FilterStore<MemoryLocation> {
    let query = query_string::query_from_input(input.unwrap_or_default());
    FilterStore::new(MemoryLocation::new(&query))
}

/// Look up a tag by slug
///
/// # Errors
///
/// Returns `SearchError::UnknownTag` if the taxonomy has no such slug.
pub fn resolve_tag<'t>(taxonomy: &'t TaxonomyCache, slug: &str) -> Result<&'t Tag> {
    taxonomy
        .tag_by_slug(slug)
        .ok_or_else(|| SearchError::UnknownTag(slug.to_string()).into())
}

/// Print the shareable URL for `state` (unless quiet)
///
/// # Errors
///
/// Returns `VaultError::ConfigError` if the configured share base is not a URL.
pub fn print_share_url(state: &FilterState, ctx: &Context<'_>) -> Result<()> {
    if ctx.quiet {
        return Ok(());
    }
    let url = share_text::share_url(&ctx.config.share_base()?, state);
    ctx.out.info(&format!("Vault link: {url}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferWriter;
    use crate::taxonomy::TaxonomyError;
    use crate::testing::{FakeApi, fixture_taxonomy, id_of};

    #[test]
    fn test_load_taxonomy_failure_is_terminal() {
        let api = FakeApi::failing_taxonomy();
        let config = VaultConfig::default();
        let out = BufferWriter::new();
        let ctx = Context {
            config: &config,
            out: &out,
            quiet: false,
        };

        let err = load_taxonomy(&api, &ctx).unwrap_err();
        assert!(matches!(
            err,
            VaultError::TaxonomyError(TaxonomyError::Unavailable(_))
        ));
        assert!(err.to_string().starts_with("Filters unavailable"));
    }

    #[test]
    fn test_load_taxonomy_respects_sensitive_setting() {
        let api = FakeApi::new(fixture_taxonomy());
        let config = VaultConfig {
            include_sensitive: false,
            ..VaultConfig::default()
        };
        let out = BufferWriter::new();
        let ctx = Context {
            config: &config,
            out: &out,
            quiet: true,
        };

        load_taxonomy(&api, &ctx).unwrap();
        assert_eq!(api.last_include_sensitive(), Some(false));
        assert_eq!(api.taxonomy_calls(), 1);
    }

    #[test]
    fn test_store_from_full_url() {
        let store = store_from_input(Some("https://bookshook.com/vault?q=duke&ku=1"));
        let state = store.current();
        assert_eq!(state.query, "duke");
        assert!(state.kindle_unlimited);
        assert!(store_from_input(None).current().is_default());
    }

    #[test]
    fn test_resolve_tag() {
        let api = FakeApi::new(fixture_taxonomy());
        let taxonomy = TaxonomyCache::load(&api, true);
        assert_eq!(resolve_tag(&taxonomy, "mf").unwrap().id, id_of("mf"));
        assert!(matches!(
            resolve_tag(&taxonomy, "nope"),
            Err(VaultError::SearchError(SearchError::UnknownTag(_)))
        ));
    }
}
