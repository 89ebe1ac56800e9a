//! Shareable links and social captions
//!
//! Everything here is plain string building over a [`FilterState`] and the
//! taxonomy indices; copying to the clipboard is left to the caller.

use crate::filters::FilterState;
use crate::taxonomy::{Tag, TaxonomyCache};
use url::Url;

/// Single-select categories shown on the caption's first line
pub const BASE_AXES: [&str; 5] = [
    "world_framework",
    "pairing",
    "heat_level",
    "series_status",
    "consent_mode",
];

/// Fallback names for safety shields by slug
pub const SAFETY_LABELS: [(&str, &str); 4] = [
    ("guaranteed_hea", "HEA Guaranteed"),
    ("no_cheating", "No Cheating"),
    ("low_angst", "Low Angst"),
    ("good_communication", "Good Communication"),
];

pub const HASHTAGS: &str = "#BookShook #RomanceBooks #RomanceReads";

const PREVIEW_LIMIT: usize = 3;

/// The current search as a shareable URL
///
/// The query component replaces whatever query `base` carried; an all-default
/// state yields the bare base URL.
#[must_use]
pub fn share_url(base: &Url, state: &FilterState) -> Url {
    let mut url = base.clone();
    let query = state.to_query_string();
    url.set_query((!query.is_empty()).then_some(query.as_str()));
    url
}

/// `"N filter(s) applied"`
#[must_use]
pub fn filter_count_summary(state: &FilterState) -> String {
    let count = state.active_count();
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} filter{plural} applied")
}

/// Social caption for a search
#[derive(Debug, Clone, Copy)]
pub struct ShareCaption<'a> {
    state: &'a FilterState,
    taxonomy: &'a TaxonomyCache,
    hashtags: bool,
}

impl<'a> ShareCaption<'a> {
    #[must_use]
    pub const fn new(state: &'a FilterState, taxonomy: &'a TaxonomyCache) -> Self {
        Self {
            state,
            taxonomy,
            hashtags: false,
        }
    }

    #[must_use]
    pub const fn with_hashtags(mut self, hashtags: bool) -> Self {
        self.hashtags = hashtags;
        self
    }

    /// Render the caption with `url` as the "Try it" link
    #[must_use]
    pub fn render(&self, url: &str) -> String {
        let (axes, dimensions): (Vec<&Tag>, Vec<&Tag>) = self
            .state
            .include
            .iter()
            .filter_map(|id| self.taxonomy.tag_by_id(id))
            .partition(|tag| BASE_AXES.contains(&tag.category.as_str()));

        let mut lines = vec!["📚 My BookShook search:".to_string()];

        if !axes.is_empty() {
            let names: Vec<&str> = axes.iter().map(|t| t.display_name.as_str()).collect();
            lines.push(names.join(" • "));
        }

        let safety = self.safety_names();
        let must_haves: Vec<String> = dimensions
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|t| t.display_name.clone())
            .chain(
                safety
                    .iter()
                    .take(PREVIEW_LIMIT.saturating_sub(dimensions.len()))
                    .cloned(),
            )
            .collect();
        let remainder = dimensions.len() + safety.len() - must_haves.len();
        if let Some(line) = capped_line("Must-haves", &must_haves, remainder) {
            lines.push(line);
        }

        let hard_nos: Vec<String> = self
            .state
            .exclude
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|id| {
                self.taxonomy
                    .tag_by_id(id)
                    .map_or_else(|| id.clone(), |tag| tag.display_name.clone())
            })
            .collect();
        let remainder = self.state.exclude.len() - hard_nos.len();
        if let Some(line) = capped_line("Hard no's", &hard_nos, remainder) {
            lines.push(line);
        }

        let query = self.state.query.trim();
        if !query.is_empty() {
            lines.push(format!("Search: \"{query}\""));
        }

        lines.push(String::new());
        lines.push(format!("Try it: {url}"));

        if self.hashtags {
            lines.push(String::new());
            lines.push(HASHTAGS.to_string());
        }

        lines.join("\n")
    }

    fn safety_names(&self) -> Vec<String> {
        self.state
            .safety
            .iter()
            .map(|id| match self.taxonomy.tag_by_id(id) {
                Some(tag) if !tag.display_name.is_empty() => tag.display_name.clone(),
                Some(tag) => safety_label(&tag.slug).map_or_else(|| id.clone(), str::to_string),
                None => id.clone(),
            })
            .collect()
    }
}

fn safety_label(slug: &str) -> Option<&'static str> {
    SAFETY_LABELS
        .iter()
        .find(|(known, _)| *known == slug)
        .map(|(_, label)| *label)
}

fn capped_line(label: &str, names: &[String], remainder: usize) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let names = names.join(", ");
    if remainder > 0 {
        Some(format!("{label}: {names} +{remainder} more"))
    } else {
        Some(format!("{label}: {names}"))
    }
}
