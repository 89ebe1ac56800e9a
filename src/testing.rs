//! Testing utilities for bookvault
//!
//! This module provides a fixture taxonomy shaped like the production
//! vocabulary and a scripted [`FakeApi`] that stands in for the HTTP client.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiError, Author, BookListItem, BooksPage, VaultApi};
use crate::search::SearchParams;
use crate::taxonomy::{Category, Tag, TaxonomyCache, TaxonomyResponse};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Id the fixture assigns to a tag slug
#[must_use]
pub fn id_of(slug: &str) -> String {
    format!("tag-{slug}")
}

fn category(slug: &str, name: &str, single_select: bool, order: i32) -> Category {
    Category {
        slug: slug.to_string(),
        display_name: name.to_string(),
        description: None,
        single_select,
        is_premium: false,
        display_order: order,
    }
}

fn tag(category: &str, slug: &str, name: &str, order: i32) -> Tag {
    Tag {
        id: id_of(slug),
        slug: slug.to_string(),
        display_name: name.to_string(),
        description: None,
        category: category.to_string(),
        parent_tag_id: None,
        is_premium: false,
        sensitive_flag: false,
        display_order: order,
    }
}

/// A small taxonomy covering every category the discovery logic special-cases
///
/// Tags are listed out of display order on purpose.
#[must_use]
pub fn fixture_taxonomy() -> TaxonomyResponse {
    TaxonomyResponse {
        categories: vec![
            category("trope", "Tropes", false, 5),
            category("world_framework", "World", true, 1),
            category("pairing", "Pairing", true, 2),
            category("heat_level", "Heat Level", true, 3),
            category("safety", "Safety Shields", false, 4),
            category("tone", "Tone", false, 6),
            category("content_warning", "Content Warnings", false, 7),
            category("kink_detail", "Kink Details", false, 8),
        ],
        tags: vec![
            tag("world_framework", "contemporary", "Contemporary", 1),
            tag("world_framework", "fantasy", "Fantasy", 2),
            tag("pairing", "ff", "F/F", 3),
            tag("pairing", "mf", "M/F", 1),
            tag("pairing", "mm", "M/M", 2),
            tag("heat_level", "closed_door", "Closed Door", 1),
            tag("heat_level", "scorching", "Scorching", 2),
            tag("safety", "guaranteed_hea", "Guaranteed HEA", 1),
            tag("safety", "no_cheating", "No Cheating", 2),
            tag("safety", "low_angst", "Low Angst", 3),
            tag("safety", "good_communication", "Good Communication", 4),
            tag("safety", "no_third_act_breakup", "No Third-Act Breakup", 5),
            tag("trope", "slow_burn", "Slow Burn", 1),
            tag("trope", "enemies_to_lovers", "Enemies to Lovers", 2),
            tag("trope", "hurt_comfort", "Hurt/Comfort", 3),
            tag("trope", "second_chance", "Second Chance", 4),
            tag("trope", "pining_unrequited", "Pining", 5),
            tag("trope", "alphahole", "Alphahole", 6),
            tag("trope", "possessive_obsessive", "Possessive", 7),
            tag("trope", "morally_grey_hero", "Morally Grey Hero", 8),
            tag("tone", "cozy_comfort_read", "Cozy Comfort Read", 1),
            tag("tone", "rom_com_humor", "Rom-Com", 2),
            tag("tone", "angsty_emotional", "Angsty", 3),
            tag("tone", "dark_tone", "Dark", 4),
            tag("content_warning", "cheating", "Cheating", 1),
            tag("content_warning", "death_on_page", "Death on Page", 2),
            tag("content_warning", "kidnapping", "Kidnapping", 3),
            tag("content_warning", "stalking", "Stalking", 4),
            tag("kink_detail", "praise", "Praise", 1),
        ],
    }
}

/// Loaded cache over [`fixture_taxonomy`]
#[must_use]
pub fn fixture_cache() -> TaxonomyCache {
    TaxonomyCache::from_response(fixture_taxonomy())
}

/// Minimal list item
#[must_use]
pub fn book(id: &str, title: &str) -> BookListItem {
    BookListItem {
        id: id.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        subtitle: None,
        description: None,
        cover_url: None,
        published_year: Some(2020),
        page_count: None,
        authors: vec![Author {
            id: "a1".to_string(),
            name: "Ada Lane".to_string(),
            slug: "ada-lane".to_string(),
        }],
        tags: Vec::new(),
    }
}

/// Search result page holding `items`
#[must_use]
pub fn books_page(items: Vec<BookListItem>, page: u32, total: u64) -> BooksPage {
    let page_size = 24;
    let total_pages = u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
    BooksPage {
        page,
        page_size,
        total,
        total_pages,
        items,
    }
}

/// One recorded search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSearch {
    pub params: SearchParams,
    pub page: u32,
    pub page_size: u32,
}

/// Scripted stand-in for the Vault API
///
/// Search responses are served in the order they were queued; an empty queue
/// answers with an empty page.
pub struct FakeApi {
    taxonomy: Option<TaxonomyResponse>,
    taxonomy_calls: Cell<usize>,
    last_include_sensitive: Cell<Option<bool>>,
    search_results: RefCell<VecDeque<Result<BooksPage, ApiError>>>,
    searches: RefCell<Vec<RecordedSearch>>,
}

impl FakeApi {
    #[must_use]
    pub fn new(taxonomy: TaxonomyResponse) -> Self {
        Self {
            taxonomy: Some(taxonomy),
            taxonomy_calls: Cell::new(0),
            last_include_sensitive: Cell::new(None),
            search_results: RefCell::new(VecDeque::new()),
            searches: RefCell::new(Vec::new()),
        }
    }

    /// An API whose taxonomy endpoint always answers 500
    #[must_use]
    pub fn failing_taxonomy() -> Self {
        Self {
            taxonomy: None,
            ..Self::new(TaxonomyResponse::default())
        }
    }

    pub fn push_search(&self, result: Result<BooksPage, ApiError>) {
        self.search_results.borrow_mut().push_back(result);
    }

    #[must_use]
    pub fn taxonomy_calls(&self) -> usize {
        self.taxonomy_calls.get()
    }

    #[must_use]
    pub fn last_include_sensitive(&self) -> Option<bool> {
        self.last_include_sensitive.get()
    }

    #[must_use]
    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.searches.borrow().clone()
    }
}

impl VaultApi for FakeApi {
    fn fetch_taxonomy(&self, include_sensitive: bool) -> Result<TaxonomyResponse, ApiError> {
        self.taxonomy_calls.set(self.taxonomy_calls.get() + 1);
        self.last_include_sensitive.set(Some(include_sensitive));
        self.taxonomy.clone().ok_or_else(|| ApiError::Status {
            status: 500,
            message: "Failed to fetch tags".to_string(),
        })
    }

    fn search_books(
        &self,
        params: &SearchParams,
        page: u32,
        page_size: u32,
    ) -> Result<BooksPage, ApiError> {
        self.searches.borrow_mut().push(RecordedSearch {
            params: params.clone(),
            page,
            page_size,
        });
        self.search_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(books_page(Vec::new(), page, 0)))
    }
}
