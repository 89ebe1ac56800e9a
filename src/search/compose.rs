//! Query composer
//!
//! Turns a [`FilterState`] plus the taxonomy indices into the parameter set
//! the search endpoint understands. Filter state speaks tag ids; the endpoint
//! speaks slugs and named flags.
//!
//! Composition is pure. Ids that no longer resolve (a shared link older than
//! the current taxonomy) are dropped without error. Slugs and flags are kept
//! in ordered sets so composing the same state twice gives equal parameters
//! no matter how the ids were ordered in the URL.
//!
//! Category-aware selection also lives here: the store knows nothing about
//! single-select categories, so [`select_include`] computes the eviction and
//! hands the store a finished patch.

use crate::filters::{FilterKind, FilterPatch, FilterState, FilterStore, Location, SortKey};
use crate::taxonomy::TaxonomyCache;
use std::collections::BTreeSet;
use std::fmt;

/// Named boolean flags sent in the `df` parameter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchFlag {
    GuaranteedHea,
    NoCheating,
    LowAngst,
    GoodCommunication,
    KindleUnlimited,
    HiddenGems,
    /// Safety tag with no dedicated flag, passed through by slug
    Other(String),
}

/// Safety slugs that map onto dedicated request flags
const SAFETY_FLAGS: [(&str, SearchFlag); 4] = [
    ("guaranteed_hea", SearchFlag::GuaranteedHea),
    ("no_cheating", SearchFlag::NoCheating),
    ("low_angst", SearchFlag::LowAngst),
    ("good_communication", SearchFlag::GoodCommunication),
];

impl SearchFlag {
    /// Flag for a safety tag slug, falling back to the raw slug
    #[must_use]
    pub fn from_safety_slug(slug: &str) -> Self {
        SAFETY_FLAGS
            .iter()
            .find(|(known, _)| *known == slug)
            .map_or_else(|| Self::Other(slug.to_string()), |(_, flag)| flag.clone())
    }

    /// Wire name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GuaranteedHea => "hea",
            Self::NoCheating => "no_cheating",
            Self::LowAngst => "low_angst",
            Self::GoodCommunication => "good_communication",
            Self::KindleUnlimited => "ku",
            Self::HiddenGems => "gems",
            Self::Other(slug) => slug,
        }
    }
}

impl fmt::Display for SearchFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one search request, minus paging
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchParams {
    /// Trimmed free text; `None` when empty
    pub query: Option<String>,
    /// Slugs books must carry
    pub tags: BTreeSet<String>,
    /// Slugs books must not carry
    pub exclude_tags: BTreeSet<String>,
    pub flags: BTreeSet<SearchFlag>,
    /// Sort, only when not the default
    pub sort: Option<SortKey>,
}

impl SearchParams {
    /// Wire query pairs for `GET /api/books`
    ///
    /// Empty sets and absent values are left out entirely rather than sent
    /// as empty strings.
    #[must_use]
    pub fn to_query_pairs(&self, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(query) = &self.query {
            pairs.push(("q", query.clone()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", join(self.tags.iter().map(String::as_str))));
        }
        if !self.exclude_tags.is_empty() {
            pairs.push((
                "excludeTags",
                join(self.exclude_tags.iter().map(String::as_str)),
            ));
        }
        if !self.flags.is_empty() {
            pairs.push(("df", join(self.flags.iter().map(SearchFlag::as_str))));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs.push(("page", page.to_string()));
        pairs.push(("pageSize", page_size.to_string()));

        pairs
    }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// Derive search parameters from filter state
#[must_use]
pub fn compose(state: &FilterState, taxonomy: &TaxonomyCache) -> SearchParams {
    let slugs = |ids: &BTreeSet<String>| -> BTreeSet<String> {
        ids.iter()
            .filter_map(|id| taxonomy.tag_by_id(id))
            .map(|tag| tag.slug.clone())
            .collect()
    };

    let mut flags: BTreeSet<SearchFlag> = state
        .safety
        .iter()
        .filter_map(|id| taxonomy.tag_by_id(id))
        .map(|tag| SearchFlag::from_safety_slug(&tag.slug))
        .collect();
    if state.kindle_unlimited {
        flags.insert(SearchFlag::KindleUnlimited);
    }
    if state.hidden_gems_only {
        flags.insert(SearchFlag::HiddenGems);
    }

    let query = state.query.trim();

    SearchParams {
        query: (!query.is_empty()).then(|| query.to_string()),
        tags: slugs(&state.include),
        exclude_tags: slugs(&state.exclude),
        flags,
        sort: (!state.sort.is_default()).then_some(state.sort),
    }
}

/// Patch that toggles `tag_id` in the include set, honoring single-select
///
/// For a tag from a single-select category every include from that category
/// is dropped first; the tag is then added if it was not selected before.
/// Deselecting therefore also clears any stray siblings a hand-edited URL
/// may carry. Multi-select categories and ids the taxonomy does not know
/// fall back to plain toggling.
#[must_use]
pub fn select_include(state: &FilterState, taxonomy: &TaxonomyCache, tag_id: &str) -> FilterPatch {
    let mut next = state.clone();

    match taxonomy.tag_by_id(tag_id) {
        Some(tag) if taxonomy.is_single_select(tag) => {
            let was_selected = next.include.contains(tag_id);
            let siblings: BTreeSet<&str> = taxonomy
                .tags_by_category(&tag.category)
                .iter()
                .map(|t| t.id.as_str())
                .collect();
            next.include.retain(|id| !siblings.contains(id.as_str()));
            if !was_selected {
                next.toggle(FilterKind::Include, tag_id);
            }
        }
        _ => next.toggle(FilterKind::Include, tag_id),
    }

    let mut patch = FilterPatch::new().include(next.include);
    if next.exclude != state.exclude {
        patch.exclude = Some(next.exclude);
    }
    if next.safety != state.safety {
        patch.safety = Some(next.safety);
    }
    patch
}

/// Category-aware include toggle applied to a store as one transition
pub fn toggle_include_in<L: Location>(
    store: &mut FilterStore<L>,
    taxonomy: &TaxonomyCache,
    tag_id: &str,
) {
    let patch = select_include(&store.current(), taxonomy, tag_id);
    store.update(patch);
}
