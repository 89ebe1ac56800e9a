//! Filter state store
//!
//! The page URL's query component is the only place filter state lives.
//! [`FilterStore`] reads it back on every [`FilterStore::current`] call and
//! rewrites it on every edit with a replace-navigation, so editing filters
//! never adds history entries.
//!
//! The store has no notion of categories; single-select eviction is done by
//! [`crate::search::compose::select_include`] before a patch reaches it.
//!
//! # Examples
//!
//! ```
//! use bookvault::filters::{FilterStore, MemoryLocation};
//!
//! let mut store = FilterStore::new(MemoryLocation::new("?q=duke"));
//! store.toggle_include("tag-1");
//! assert_eq!(store.location().query(), "q=duke&include=tag-1");
//! ```

use super::query_string;
use super::types::{FilterKind, FilterPatch, FilterState};
use tracing::trace;

/// Seam over the page URL's query component
pub trait Location {
    /// Current query string, without the leading `?`
    fn query(&self) -> String;

    /// Replace the query string in place, without a new history entry
    fn replace_query(&mut self, query: &str);
}

/// In-process [`Location`]
///
/// Counts replacements so callers can check that every edit was exactly one
/// navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    replacements: usize,
}

impl MemoryLocation {
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
            replacements: 0,
        }
    }

    /// Current query string
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// How many replace-navigations have happened
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

/// Handle returned by [`FilterStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FilterState)>;

/// Filter state backed by a [`Location`]
pub struct FilterStore<L: Location> {
    location: L,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<L: Location> FilterStore<L> {
    #[must_use]
    pub fn new(location: L) -> Self {
        Self {
            location,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// State reconstructed from the current query string
    #[must_use]
    pub fn current(&self) -> FilterState {
        query_string::parse(&self.location.query())
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    #[must_use]
    pub fn into_location(self) -> L {
        self.location
    }

    /// Merge a partial state and rewrite the query string
    pub fn update(&mut self, patch: FilterPatch) {
        let mut state = self.current();
        state.apply(patch);
        self.commit(&state);
    }

    pub fn toggle_include(&mut self, tag_id: &str) {
        self.toggle(FilterKind::Include, tag_id);
    }

    pub fn toggle_exclude(&mut self, tag_id: &str) {
        self.toggle(FilterKind::Exclude, tag_id);
    }

    pub fn toggle_safety(&mut self, tag_id: &str) {
        self.toggle(FilterKind::Safety, tag_id);
    }

    fn toggle(&mut self, kind: FilterKind, tag_id: &str) {
        let mut state = self.current();
        state.toggle(kind, tag_id);
        self.commit(&state);
    }

    /// Drop a single id from one set
    pub fn remove(&mut self, kind: FilterKind, tag_id: &str) {
        let mut state = self.current();
        if state.remove(kind, tag_id) {
            self.commit(&state);
        }
    }

    /// Overwrite include and safety, reset everything else, in one transition
    pub fn apply_preset<I, S>(&mut self, include_ids: I, safety_ids: S)
    where
        I: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        let patch = FilterPatch {
            include: Some(include_ids.into_iter().collect()),
            safety: Some(safety_ids.into_iter().collect()),
            ..FilterPatch::reset()
        };
        self.update(patch);
    }

    /// Reset every field to its default in one transition
    pub fn clear_all(&mut self) {
        self.commit(&FilterState::default());
    }

    /// Register a callback run once after every transition
    pub fn subscribe(&mut self, listener: impl FnMut(&FilterState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, state: &FilterState) {
        let query = query_string::serialize(state);
        trace!(%query, "filter state committed");
        self.location.replace_query(&query);
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}
