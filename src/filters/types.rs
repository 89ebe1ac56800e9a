//! Filter state data structures
//!
//! This module defines the search criteria the user is currently applying:
//! - `FilterState`: the full set of criteria, mirrored in the page URL
//! - `FilterPatch`: a partial update merged into a `FilterState`
//! - `SortKey`: result ordering
//! - `FilterKind`: which of the three tag sets an id lives in

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Result ordering understood by the search endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Grovel,
    RegretLow,
    Heat,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Newest, Self::Grovel, Self::RegretLow, Self::Heat];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Grovel => "grovel",
            Self::RegretLow => "regret_low",
            Self::Heat => "heat",
        }
    }

    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Newest)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown sort '{s}' (expected one of: {})", valid.join(", "))
            })
    }
}

/// The three tag-id sets of a filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Books must carry the tag
    Include,
    /// Books must not carry the tag (content-warning avoidance)
    Exclude,
    /// Safety shield guarantee
    Safety,
}

impl FilterKind {
    pub const ALL: [Self; 3] = [Self::Include, Self::Exclude, Self::Safety];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Safety => "safety",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current search criteria
///
/// The three id sets are `BTreeSet`s: duplicates cannot exist and id order
/// carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text query
    pub query: String,
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub safety: BTreeSet<String>,
    /// Only Kindle Unlimited titles
    pub kindle_unlimited: bool,
    /// Only under-the-radar titles
    pub hidden_gems_only: bool,
    pub sort: SortKey,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn ids(&self, kind: FilterKind) -> &BTreeSet<String> {
        match kind {
            FilterKind::Include => &self.include,
            FilterKind::Exclude => &self.exclude,
            FilterKind::Safety => &self.safety,
        }
    }

    const fn ids_mut(&mut self, kind: FilterKind) -> &mut BTreeSet<String> {
        match kind {
            FilterKind::Include => &mut self.include,
            FilterKind::Exclude => &mut self.exclude,
            FilterKind::Safety => &mut self.safety,
        }
    }

    /// Add the id if absent, remove it if present
    ///
    /// Adding an id to one set takes it out of the other two so the sets stay
    /// disjoint.
    pub fn toggle(&mut self, kind: FilterKind, id: &str) {
        if self.ids_mut(kind).remove(id) {
            return;
        }
        for other in FilterKind::ALL.into_iter().filter(|k| *k != kind) {
            self.ids_mut(other).remove(id);
        }
        self.ids_mut(kind).insert(id.to_string());
    }

    /// Remove one id from one set; returns whether it was there
    pub fn remove(&mut self, kind: FilterKind, id: &str) -> bool {
        self.ids_mut(kind).remove(id)
    }

    /// Merge a patch; fields the patch leaves as `None` are kept
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(include) = patch.include {
            self.include = include;
        }
        if let Some(exclude) = patch.exclude {
            self.exclude = exclude;
        }
        if let Some(safety) = patch.safety {
            self.safety = safety;
        }
        if let Some(ku) = patch.kindle_unlimited {
            self.kindle_unlimited = ku;
        }
        if let Some(gems) = patch.hidden_gems_only {
            self.hidden_gems_only = gems;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }

    /// Number of tag filters in effect (include + exclude + safety)
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.include.len() + self.exclude.len() + self.safety.len()
    }

    /// True when every field holds its default
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize to the shareable query string
    #[must_use]
    pub fn to_query_string(&self) -> String {
        super::query_string::serialize(self)
    }

    /// Parse from a shareable query string; never fails
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        super::query_string::parse(query)
    }
}

/// Partial filter state
///
/// Every field is optional; `None` means "leave as is".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub query: Option<String>,
    pub include: Option<BTreeSet<String>>,
    pub exclude: Option<BTreeSet<String>>,
    pub safety: Option<BTreeSet<String>>,
    pub kindle_unlimited: Option<bool>,
    pub hidden_gems_only: Option<bool>,
    pub sort: Option<SortKey>,
}

impl FilterPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that resets every field to its default
    #[must_use]
    pub fn reset() -> Self {
        Self {
            query: Some(String::new()),
            include: Some(BTreeSet::new()),
            exclude: Some(BTreeSet::new()),
            safety: Some(BTreeSet::new()),
            kindle_unlimited: Some(false),
            hidden_gems_only: Some(false),
            sort: Some(SortKey::default()),
        }
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn include<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn safety<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safety = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn kindle_unlimited(mut self, enabled: bool) -> Self {
        self.kindle_unlimited = Some(enabled);
        self
    }

    #[must_use]
    pub const fn hidden_gems_only(mut self, enabled: bool) -> Self {
        self.hidden_gems_only = Some(enabled);
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// True if the patch leaves the state untouched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
