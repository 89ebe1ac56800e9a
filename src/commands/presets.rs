//! Preset commands - list the curated bundles or apply one

use super::search::show_results;
use super::{Context, Result, load_taxonomy, print_share_url, store_from_input};
use crate::api::VaultApi;
use crate::presets::{self, Preset};
use crate::search::ResultsView;
use colored::Colorize;

/// List the built-in presets
///
/// With a Vault URL, the preset that URL is showing (if any) is marked.
///
/// # Errors
///
/// Returns an error if a URL is given and the taxonomy is unavailable.
pub fn list<A: VaultApi + ?Sized>(api: &A, url: Option<&str>, ctx: &Context<'_>) -> Result<()> {
    let active = match url {
        Some(url) => {
            let taxonomy = load_taxonomy(api, ctx)?;
            let state = store_from_input(Some(url)).current();
            presets::active_preset(&state, &taxonomy).map(|p| p.id)
        }
        None => None,
    };

    for preset in presets::builtin_presets() {
        ctx.out.write(&preset_line(preset, active == Some(preset.id), ctx.quiet));
    }
    Ok(())
}

fn preset_line(preset: &Preset, active: bool, quiet: bool) -> String {
    if quiet {
        return preset.id.to_string();
    }
    let marker = if active { "●".green() } else { " ".normal() };
    format!(
        "{marker} {} {} - {}",
        preset.name.bold(),
        format!("[{}]", preset.id).dimmed(),
        preset.tagline
    )
}

/// Apply a preset to a search and show the results
///
/// # Errors
///
/// Returns an error if the preset id is unknown or the taxonomy is unavailable.
pub fn apply<A: VaultApi + ?Sized>(
    api: &A,
    id: &str,
    url: Option<&str>,
    ctx: &Context<'_>,
) -> Result<ResultsView> {
    let preset = presets::find_preset(id)?;
    let taxonomy = load_taxonomy(api, ctx)?;
    let mut store = store_from_input(url);

    presets::apply_preset(&mut store, &taxonomy, preset);

    let state = store.current();
    if !ctx.quiet {
        ctx.out.success(&format!("{}: {}", preset.name, preset.tagline));
    }
    print_share_url(&state, ctx)?;
    Ok(show_results(api, &taxonomy, &state, 1, ctx))
}
