//! Search command - edit a Vault search and show one page of results

use super::{Context, Result, load_taxonomy, print_share_url, resolve_tag, store_from_input};
use crate::api::VaultApi;
use crate::cli::SearchArgs;
use crate::filters::{FilterKind, FilterPatch, FilterState, FilterStore, Location};
use crate::output;
use crate::search::{ResultPager, ResultsView, compose, toggle_include_in};
use crate::taxonomy::TaxonomyCache;

/// Execute the search command
///
/// Returns the results view that was printed so the caller can pick an exit
/// status.
///
/// # Errors
///
/// Returns an error if the taxonomy is unavailable or a slug is unknown. A
/// failed search request is not an error here; it is reported in the view.
pub fn execute<A: VaultApi + ?Sized>(
    api: &A,
    args: &SearchArgs,
    ctx: &Context<'_>,
) -> Result<ResultsView> {
    let taxonomy = load_taxonomy(api, ctx)?;
    let mut store = store_from_input(args.url.as_deref());

    apply_edits(&mut store, &taxonomy, args)?;

    let state = store.current();
    print_share_url(&state, ctx)?;
    Ok(show_results(api, &taxonomy, &state, args.page, ctx))
}

/// Apply the command-line edits to the store, one transition per edit
///
/// # Errors
///
/// Returns `SearchError::UnknownTag` for a slug the taxonomy doesn't have.
pub fn apply_edits<L: Location>(
    store: &mut FilterStore<L>,
    taxonomy: &TaxonomyCache,
    args: &SearchArgs,
) -> Result<()> {
    if args.clear {
        store.clear_all();
    }
    if let Some(query) = &args.query {
        store.update(FilterPatch::new().query(query.trim()));
    }

    for slug in &args.include {
        let id = resolve_tag(taxonomy, slug)?.id.clone();
        toggle_include_in(store, taxonomy, &id);
    }
    for slug in &args.exclude {
        let id = resolve_tag(taxonomy, slug)?.id.clone();
        store.toggle_exclude(&id);
    }
    for slug in &args.safety {
        let id = resolve_tag(taxonomy, slug)?.id.clone();
        store.toggle_safety(&id);
    }
    for slug in &args.remove {
        let id = resolve_tag(taxonomy, slug)?.id.clone();
        for kind in FilterKind::ALL {
            store.remove(kind, &id);
        }
    }

    let mut patch = FilterPatch::new();
    patch.kindle_unlimited = args.kindle_unlimited();
    patch.hidden_gems_only = args.hidden_gems();
    patch.sort = args.sort;
    if !patch.is_empty() {
        store.update(patch);
    }

    Ok(())
}

/// Fetch and print one page of results for `state`
pub fn show_results<A: VaultApi + ?Sized>(
    api: &A,
    taxonomy: &TaxonomyCache,
    state: &FilterState,
    page: u32,
    ctx: &Context<'_>,
) -> ResultsView {
    let mut pager = ResultPager::new(ctx.config.page_size);
    let mut request = pager.set_params(compose(state, taxonomy));
    if page > 1 {
        request = Some(pager.set_page(page));
    }
    if let Some(request) = request {
        pager.run(&request, api);
    }

    let view = pager.view(state);
    output::results(&view, taxonomy, ctx.out, ctx.quiet);
    view
}
