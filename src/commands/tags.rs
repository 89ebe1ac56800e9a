//! Tags command - browse the taxonomy

use super::{Context, Result, load_taxonomy};
use crate::api::VaultApi;
use crate::output;
use crate::taxonomy::TaxonomyError;

/// Execute the tags command
///
/// # Errors
///
/// Returns an error if the taxonomy is unavailable or `category` is not a
/// known category slug.
pub fn execute<A: VaultApi + ?Sized>(
    api: &A,
    category: Option<&str>,
    ctx: &Context<'_>,
) -> Result<()> {
    let taxonomy = load_taxonomy(api, ctx)?;

    let Some(slug) = category else {
        if !ctx.quiet {
            ctx.out.write("Categories:");
        }
        for category in taxonomy.categories() {
            let count = taxonomy.tags_by_category(&category.slug).len();
            ctx.out
                .write(&output::category_line(category, count, ctx.quiet));
        }
        return Ok(());
    };

    let category = taxonomy
        .category_by_slug(slug)
        .ok_or_else(|| TaxonomyError::UnknownCategory(slug.to_string()))?;

    if !ctx.quiet {
        ctx.out.write(&format!("{}:", taxonomy.category_label(slug)));
        if let Some(description) = &category.description {
            ctx.out.info(description);
        }
    }
    for tag in taxonomy.tags_by_category(slug) {
        ctx.out.write(&output::tag_line(tag, &taxonomy, ctx.quiet));
    }
    Ok(())
}
