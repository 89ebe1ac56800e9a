//! Built-in search presets
//!
//! A preset is a named bundle of tag slugs. Slugs are resolved against the
//! live taxonomy when the preset is applied, so a preset naming a tag that
//! no longer exists still applies the rest of its bundle.

use crate::filters::{FilterState, FilterStore, Location};
use crate::search::SearchError;
use crate::taxonomy::TaxonomyCache;
use std::collections::BTreeSet;
use tracing::debug;

/// A named include/safety slug bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub include: &'static [&'static str],
    pub safety: &'static [&'static str],
}

/// A preset after slug resolution; ids only
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedPreset {
    pub include_ids: BTreeSet<String>,
    pub safety_ids: BTreeSet<String>,
}

static PRESETS: [Preset; 5] = [
    Preset {
        id: "devastate-me",
        name: "Devastate Me",
        tagline: "Wreck my heart. Make it worth it.",
        include: &["angsty_emotional", "slow_burn", "hurt_comfort"],
        safety: &["guaranteed_hea"],
    },
    Preset {
        id: "unhinged-hours",
        name: "Unhinged Hours",
        tagline: "Morally grey everything. No apologies.",
        include: &["dark_tone", "possessive_obsessive", "morally_grey_hero"],
        safety: &[],
    },
    Preset {
        id: "comfort-read",
        name: "Comfort Read",
        tagline: "Low stakes. Guaranteed landing.",
        include: &["cozy_comfort_read", "rom_com_humor"],
        safety: &[
            "guaranteed_hea",
            "no_cheating",
            "low_angst",
            "good_communication",
        ],
    },
    Preset {
        id: "slow-burn-agony",
        name: "Slow Burn Agony",
        tagline: "300 pages before they touch.",
        include: &["slow_burn", "pining_unrequited", "enemies_to_lovers"],
        safety: &["guaranteed_hea"],
    },
    Preset {
        id: "grovel-worthy",
        name: "Grovel Worthy",
        tagline: "He messed up. Now he crawls.",
        include: &["alphahole", "second_chance", "hurt_comfort"],
        safety: &[],
    },
];

#[must_use]
pub fn builtin_presets() -> &'static [Preset] {
    &PRESETS
}

/// Look up a built-in preset by id
///
/// # Errors
///
/// Returns `SearchError::UnknownPreset` if no preset has this id.
pub fn find_preset(id: &str) -> Result<&'static Preset, SearchError> {
    PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .ok_or_else(|| SearchError::UnknownPreset(id.to_string()))
}

impl Preset {
    /// Resolve slugs to ids, silently skipping slugs the taxonomy lacks
    #[must_use]
    pub fn resolve(&self, taxonomy: &TaxonomyCache) -> ResolvedPreset {
        let ids = |slugs: &[&str]| -> BTreeSet<String> {
            slugs
                .iter()
                .filter_map(|slug| taxonomy.tag_by_slug(slug))
                .map(|tag| tag.id.clone())
                .collect()
        };

        ResolvedPreset {
            include_ids: ids(self.include),
            safety_ids: ids(self.safety),
        }
    }
}

/// Resolve `preset` and apply it to the store as one transition
pub fn apply_preset<L: Location>(
    store: &mut FilterStore<L>,
    taxonomy: &TaxonomyCache,
    preset: &Preset,
) -> ResolvedPreset {
    let resolved = preset.resolve(taxonomy);
    debug!(
        preset = preset.id,
        include = resolved.include_ids.len(),
        safety = resolved.safety_ids.len(),
        "applying preset"
    );
    store.apply_preset(resolved.include_ids.clone(), resolved.safety_ids.clone());
    resolved
}

/// The preset the state is exactly showing, if any
///
/// Any edit after applying a preset (a query, a toggle, another sort)
/// means no preset is active anymore.
#[must_use]
pub fn active_preset(state: &FilterState, taxonomy: &TaxonomyCache) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| {
        let resolved = preset.resolve(taxonomy);
        let applied = FilterState {
            include: resolved.include_ids,
            safety: resolved.safety_ids,
            ..FilterState::default()
        };
        !applied.is_default() && applied == *state
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterPatch, MemoryLocation, SortKey};
    use crate::testing::{fixture_cache, fixture_taxonomy, id_of};
    use crate::taxonomy::TaxonomyResponse;

    fn ids(slugs: &[&str]) -> BTreeSet<String> {
        slugs.iter().map(|s| id_of(s)).collect()
    }

    #[test]
    fn test_builtin_ids() {
        let ids: Vec<&str> = builtin_presets().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                "devastate-me",
                "unhinged-hours",
                "comfort-read",
                "slow-burn-agony",
                "grovel-worthy"
            ]
        );
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("comfort-read").unwrap().name, "Comfort Read");
        assert!(matches!(
            find_preset("cry-a-lot"),
            Err(SearchError::UnknownPreset(id)) if id == "cry-a-lot"
        ));
    }

    #[test]
    fn test_comfort_read_on_empty_state() {
        let taxonomy = fixture_cache();
        let mut store = FilterStore::new(MemoryLocation::new(""));
        let preset = find_preset("comfort-read").unwrap();

        apply_preset(&mut store, &taxonomy, preset);

        let state = store.current();
        assert_eq!(state.include, ids(&["cozy_comfort_read", "rom_com_humor"]));
        assert_eq!(
            state.safety,
            ids(&["guaranteed_hea", "no_cheating", "low_angst", "good_communication"])
        );
        assert_eq!(store.location().replacements(), 1);
    }

    #[test]
    fn test_preset_overwrites_prior_state() {
        let taxonomy = fixture_cache();
        let mut store = FilterStore::new(MemoryLocation::new(""));
        store.update(
            FilterPatch::new()
                .query("duke")
                .exclude([id_of("cheating")])
                .sort(SortKey::Grovel)
                .kindle_unlimited(true),
        );

        apply_preset(&mut store, &taxonomy, find_preset("grovel-worthy").unwrap());

        let state = store.current();
        assert!(state.exclude.is_empty());
        assert!(state.query.is_empty());
        assert_eq!(state.sort, SortKey::Newest);
        assert!(!state.kindle_unlimited);
        assert!(state.safety.is_empty());
        assert_eq!(state.include.len(), 3);
    }

    #[test]
    fn test_unresolvable_slugs_are_skipped() {
        let mut response = fixture_taxonomy();
        response.tags.retain(|tag| tag.slug != "dark_tone");
        let taxonomy = TaxonomyCache::from_response(response);

        let resolved = find_preset("unhinged-hours").unwrap().resolve(&taxonomy);
        assert_eq!(
            resolved.include_ids,
            ids(&["possessive_obsessive", "morally_grey_hero"])
        );

        let empty = TaxonomyCache::from_response(TaxonomyResponse::default());
        assert_eq!(
            find_preset("devastate-me").unwrap().resolve(&empty),
            ResolvedPreset::default()
        );
    }

    #[test]
    fn test_active_preset() {
        let taxonomy = fixture_cache();
        let mut store = FilterStore::new(MemoryLocation::new(""));
        assert!(active_preset(&store.current(), &taxonomy).is_none());

        apply_preset(&mut store, &taxonomy, find_preset("slow-burn-agony").unwrap());
        assert_eq!(
            active_preset(&store.current(), &taxonomy).map(|p| p.id),
            Some("slow-burn-agony")
        );

        store.update(FilterPatch::new().query("duke"));
        assert!(active_preset(&store.current(), &taxonomy).is_none());
    }
}
