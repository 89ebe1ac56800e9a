//! Book command - show one book

use super::{Context, Result};
use crate::api::{BookInteractions, InteractionType, VaultClient};
use crate::output;
use tracing::debug;

/// Execute the book command
///
/// When a session cookie is configured, the member's heart/save/TBR flags are
/// shown too; failing to fetch them is not an error.
///
/// # Errors
///
/// Returns `VaultError::ApiError` if the book cannot be fetched.
pub fn execute(client: &VaultClient, slug: &str, ctx: &Context<'_>) -> Result<()> {
    let detail = client.book_by_slug(slug)?;

    if ctx.quiet {
        ctx.out.write(&detail.item.id);
        return Ok(());
    }

    ctx.out.write(&output::book_detail(&detail));

    if ctx.config.session_cookie.is_some() {
        match client.interactions(&detail.item.id) {
            Ok(interactions) => {
                if let Some(line) = interactions_line(&interactions) {
                    ctx.out.info(&line);
                }
            }
            Err(e) => debug!(error = %e, "interactions unavailable"),
        }
    }
    Ok(())
}

fn interactions_line(interactions: &BookInteractions) -> Option<String> {
    let set: Vec<&str> = [
        (InteractionType::Heart, "♥ hearted"),
        (InteractionType::Save, "saved"),
        (InteractionType::Tbr, "on your TBR"),
    ]
    .into_iter()
    .filter(|(kind, _)| interactions.is_set(*kind))
    .map(|(_, label)| label)
    .collect();

    (!set.is_empty()).then(|| set.join(" · "))
}
