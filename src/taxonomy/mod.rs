//! Taxonomy cache
//!
//! Fetches the category/tag vocabulary once and derives the lookup indices the
//! rest of the crate reads: category by slug, tags by category (in display
//! order), tag by id and tag by slug.
//!
//! A failed fetch does not produce an error value. The cache comes back in
//! [`TaxonomyStatus::Failed`] with every index empty, and callers that need
//! tags must check [`TaxonomyCache::require_loaded`] so that "filters
//! unavailable" is never mistaken for "no tags exist". There is no retry.
//!
//! # Examples
//!
//! ```
//! use bookvault::taxonomy::{Category, Tag, TaxonomyCache, TaxonomyResponse};
//!
//! let cache = TaxonomyCache::from_response(TaxonomyResponse {
//!     categories: vec![Category {
//!         slug: "trope".into(),
//!         display_name: "Tropes".into(),
//!         description: None,
//!         single_select: false,
//!         is_premium: false,
//!         display_order: 1,
//!     }],
//!     tags: vec![Tag {
//!         id: "t1".into(),
//!         slug: "slow_burn".into(),
//!         display_name: "Slow Burn".into(),
//!         description: None,
//!         category: "trope".into(),
//!         parent_tag_id: None,
//!         is_premium: false,
//!         sensitive_flag: false,
//!         display_order: 1,
//!     }],
//! });
//!
//! assert_eq!(cache.tag_by_slug("slow_burn").map(|t| t.id.as_str()), Some("t1"));
//! assert_eq!(cache.tags_by_category("trope").len(), 1);
//! ```

pub mod error;
pub mod types;

pub use error::TaxonomyError;
pub use types::{Category, Tag, TaxonomyResponse};

use crate::api::VaultApi;
use heck::ToTitleCase;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Categories whose tags are premium even when the API does not flag them
pub const PREMIUM_CATEGORIES: [&str; 3] = ["consent_mode", "kink_bundle", "kink_detail"];

/// Load outcome of the taxonomy cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyStatus {
    Loaded,
    /// Fetch failed; the message is kept for display
    Failed(String),
}

/// Indexed, read-only view over one taxonomy snapshot
#[derive(Debug, Clone)]
pub struct TaxonomyCache {
    status: TaxonomyStatus,
    categories: Vec<Category>,
    category_index: HashMap<String, usize>,
    tags: HashMap<String, Tag>,
    id_by_slug: HashMap<String, String>,
    ids_by_category: HashMap<String, Vec<String>>,
}

impl TaxonomyCache {
    /// Issue the one taxonomy request and build the indices
    ///
    /// Never fails: a transport or decode error yields a cache in the
    /// `Failed` state with empty indices.
    pub fn load<A: VaultApi + ?Sized>(api: &A, include_sensitive: bool) -> Self {
        match api.fetch_taxonomy(include_sensitive) {
            Ok(response) => {
                let cache = Self::from_response(response);
                debug!(
                    categories = cache.categories.len(),
                    tags = cache.tags.len(),
                    "taxonomy loaded"
                );
                cache
            }
            Err(e) => {
                warn!(error = %e, "taxonomy fetch failed");
                Self::failed(e.to_string())
            }
        }
    }

    /// Build a loaded cache from an already-fetched response
    #[must_use]
    pub fn from_response(response: TaxonomyResponse) -> Self {
        let mut categories = response.categories;
        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let category_index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.slug.clone(), i))
            .collect();

        let mut tag_list = response.tags;
        tag_list.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let mut ids_by_category: HashMap<String, Vec<String>> = HashMap::new();
        let mut id_by_slug = HashMap::new();
        let mut tags = HashMap::new();

        for tag in tag_list {
            ids_by_category
                .entry(tag.category.clone())
                .or_default()
                .push(tag.id.clone());
            id_by_slug.insert(tag.slug.clone(), tag.id.clone());
            tags.insert(tag.id.clone(), tag);
        }

        Self {
            status: TaxonomyStatus::Loaded,
            categories,
            category_index,
            tags,
            id_by_slug,
            ids_by_category,
        }
    }

    /// A cache that failed to load
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: TaxonomyStatus::Failed(reason.into()),
            categories: Vec::new(),
            category_index: HashMap::new(),
            tags: HashMap::new(),
            id_by_slug: HashMap::new(),
            ids_by_category: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &TaxonomyStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, TaxonomyStatus::Failed(_))
    }

    /// Borrow the cache only if it loaded
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Unavailable` when the fetch failed.
    pub fn require_loaded(&self) -> Result<&Self, TaxonomyError> {
        match &self.status {
            TaxonomyStatus::Loaded => Ok(self),
            TaxonomyStatus::Failed(reason) => Err(TaxonomyError::Unavailable(reason.clone())),
        }
    }

    /// All categories in display order
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.category_index.get(slug).map(|&i| &self.categories[i])
    }

    /// Tags of one category sorted by display order
    ///
    /// Empty for an unknown category or one without tags.
    #[must_use]
    pub fn tags_by_category(&self, slug: &str) -> Vec<&Tag> {
        self.ids_by_category
            .get(slug)
            .map(|ids| ids.iter().filter_map(|id| self.tags.get(id)).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn tag_by_id(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    #[must_use]
    pub fn tag_by_slug(&self, slug: &str) -> Option<&Tag> {
        self.id_by_slug.get(slug).and_then(|id| self.tags.get(id))
    }

    /// Number of tags in the snapshot
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// True if the tag's category only allows one include at a time
    #[must_use]
    pub fn is_single_select(&self, tag: &Tag) -> bool {
        self.category_by_slug(&tag.category)
            .is_some_and(|c| c.single_select)
    }

    /// Display label for a category slug
    ///
    /// Falls back to a title-cased slug when the category is unknown.
    #[must_use]
    pub fn category_label(&self, slug: &str) -> String {
        self.category_by_slug(slug)
            .map_or_else(|| slug.to_title_case(), |c| c.display_name.clone())
    }

    /// True if selecting the tag requires a paid membership
    #[must_use]
    pub fn is_premium_tag(&self, tag: &Tag) -> bool {
        tag.is_premium
            || PREMIUM_CATEGORIES.contains(&tag.category.as_str())
            || self
                .category_by_slug(&tag.category)
                .is_some_and(|c| c.is_premium)
    }
}
