//! Wire types for the Vault API
//!
//! These mirror the JSON the remote service returns. The book endpoints use
//! camelCase keys; the taxonomy endpoint uses snake_case and lives in
//! [`crate::taxonomy`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Book author as embedded in list items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Tag as embedded in list items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookTag {
    pub id: String,
    pub category: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub single_select: bool,
}

/// Read-only projection of a book returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookListItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub tags: Vec<BookTag>,
}

impl BookListItem {
    /// Comma-joined author names, or "Unknown Author"
    #[must_use]
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown Author".to_string();
        }
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BooksPage {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub items: Vec<BookListItem>,
}

/// Full book record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    #[serde(flatten)]
    pub item: BookListItem,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BookDetailResponse {
    pub book: BookDetail,
}

/// Member interaction kinds that can be toggled on a book
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Heart,
    Save,
    Tbr,
}

impl InteractionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Save => "save",
            Self::Tbr => "tbr",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction flags the current member has set on a book
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BookInteractions {
    #[serde(default)]
    pub heart: bool,
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub tbr: bool,
}

impl BookInteractions {
    #[must_use]
    pub const fn is_set(&self, kind: InteractionType) -> bool {
        match kind {
            InteractionType::Heart => self.heart,
            InteractionType::Save => self.save,
            InteractionType::Tbr => self.tbr,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookInteractionsResponse {
    pub book_id: String,
    pub interactions: BookInteractions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InteractionPayload<'a> {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub book_id: &'a str,
}

/// Which shelf of the member library to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LibraryFilter {
    #[default]
    All,
    Heart,
    Save,
    Tbr,
}

impl LibraryFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Heart => "heart",
            Self::Save => "save",
            Self::Tbr => "tbr",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub book: BookListItem,
    #[serde(default)]
    pub interaction_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of the member library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPage {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub items: Vec<LibraryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub book: BookListItem,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Recommendations come back either as plain items or as scored entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Recommendations {
    #[serde(default)]
    pub items: Option<Vec<BookListItem>>,
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationItem>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Recommendations {
    /// All recommended books regardless of which shape the server used
    #[must_use]
    pub fn books(&self) -> Vec<&BookListItem> {
        let plain = self.items.iter().flatten();
        let scored = self.recommendations.iter().flatten().map(|r| &r.book);
        plain.chain(scored).collect()
    }
}

/// Error body the API sends alongside failures
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
