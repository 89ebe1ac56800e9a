//! Share command - print a social caption for a search

use super::{Context, Result, load_taxonomy, store_from_input};
use crate::api::VaultApi;
use crate::share::{ShareCaption, filter_count_summary, share_url};

/// Execute the share command
///
/// Returns the caption that was printed.
///
/// # Errors
///
/// Returns an error if the taxonomy is unavailable or the configured share
/// base is not a URL. Clipboard trouble is only a warning.
pub fn execute<A: VaultApi + ?Sized>(
    api: &A,
    url: Option<&str>,
    hashtags: bool,
    copy: bool,
    ctx: &Context<'_>,
) -> Result<String> {
    let taxonomy = load_taxonomy(api, ctx)?;
    let state = store_from_input(url).current();
    let link = share_url(&ctx.config.share_base()?, &state);

    let caption = ShareCaption::new(&state, &taxonomy)
        .with_hashtags(hashtags)
        .render(link.as_str());

    if !ctx.quiet {
        ctx.out.info(&filter_count_summary(&state));
    }
    ctx.out.write(&caption);

    if copy {
        match copy_to_clipboard(&caption) {
            Ok(()) => {
                if !ctx.quiet {
                    ctx.out.success("Copied caption to clipboard");
                }
            }
            Err(e) => ctx.out.warning(&e),
        }
    }

    Ok(caption)
}

fn copy_to_clipboard(text: &str) -> std::result::Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {e}"))?;
    clipboard
        .set_text(text)
        .map_err(|e| format!("Clipboard error: {e}"))
}
