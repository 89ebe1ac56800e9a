//! Taxonomy data structures
//!
//! Categories and tags as served by the taxonomy endpoint. Both are immutable
//! for the lifetime of a loaded cache.

use serde::{Deserialize, Serialize};

/// A single filterable attribute of a book (trope, heat level, content warning...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Opaque identifier, used in filter state and shareable URLs
    pub id: String,
    /// Stable slug, used in search requests
    pub slug: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Slug of the owning category
    pub category: String,
    #[serde(default)]
    pub parent_tag_id: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub sensitive_flag: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// A grouping of tags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// At most one tag of this category may be an include filter at a time
    #[serde(default)]
    pub single_select: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Body of `GET /api/tags`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TaxonomyResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}
