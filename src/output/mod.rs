//! Output formatting for CLI display
//!
//! This module provides the [`OutputWriter`] seam and the helpers that turn
//! books, tags, and result pages into terminal lines.

mod writer;

pub use writer::{BufferWriter, MessageLevel, OutputWriter, TerminalWriter};

use crate::api::{BookDetail, BookListItem};
use crate::search::{EmptyAffordance, ResultsView};
use crate::taxonomy::{Category, Tag, TaxonomyCache};
use colored::Colorize;

/// One line for a book in a result list
#[must_use]
pub fn book_line(book: &BookListItem, quiet: bool) -> String {
    if quiet {
        return book.slug.clone();
    }

    let year = book
        .published_year
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    format!("  {}{year} by {}", book.title.bold(), book.author_names())
}

/// Multi-line description of a single book
#[must_use]
pub fn book_detail(detail: &BookDetail) -> String {
    let book = &detail.item;
    let mut lines = vec![book.title.bold().to_string()];

    if let Some(subtitle) = &book.subtitle {
        lines.push(subtitle.italic().to_string());
    }
    lines.push(format!("by {}", book.author_names()));

    let mut facts = Vec::new();
    if let Some(year) = book.published_year {
        facts.push(year.to_string());
    }
    if let Some(pages) = book.page_count {
        facts.push(format!("{pages} pages"));
    }
    if !facts.is_empty() {
        lines.push(facts.join(" · ").dimmed().to_string());
    }

    if let Some(description) = &book.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    if !book.tags.is_empty() {
        let names: Vec<&str> = book.tags.iter().map(|t| t.name.as_str()).collect();
        lines.push(String::new());
        lines.push(format!("Tags: {}", names.join(", ")));
    }

    lines.push(
        format!("Added {}", detail.created_at.format("%Y-%m-%d"))
            .dimmed()
            .to_string(),
    );

    lines.join("\n")
}

/// Heading for a category in `tags` listings
#[must_use]
pub fn category_line(category: &Category, tag_count: usize, quiet: bool) -> String {
    if quiet {
        return category.slug.clone();
    }

    let mode = if category.single_select {
        "pick one"
    } else {
        "pick any"
    };
    format!(
        "  {} {} ({tag_count} tags, {mode})",
        category.display_name.bold(),
        format!("[{}]", category.slug).dimmed()
    )
}

/// A tag within a category listing
#[must_use]
pub fn tag_line(tag: &Tag, taxonomy: &TaxonomyCache, quiet: bool) -> String {
    if quiet {
        return tag.slug.clone();
    }

    let premium = if taxonomy.is_premium_tag(tag) {
        format!(" {}", "★".yellow())
    } else {
        String::new()
    };
    format!(
        "  {} {}{premium}",
        tag.display_name,
        format!("({})", tag.slug).dimmed()
    )
}

/// Render a results view through `out`
pub fn results(view: &ResultsView, taxonomy: &TaxonomyCache, out: &dyn OutputWriter, quiet: bool) {
    match view {
        ResultsView::Idle => {}
        ResultsView::Loading => {
            if !quiet {
                out.info("Searching...");
            }
        }
        ResultsView::Error { message } => {
            out.error(&format!("Couldn't load results: {message}"));
            if !quiet {
                out.info("Run the same command again to retry.");
            }
        }
        ResultsView::Empty { affordances } => {
            if quiet {
                return;
            }
            out.warning("No books match these filters.");
            for affordance in affordances {
                out.info(&affordance_line(affordance, taxonomy));
            }
        }
        ResultsView::Results {
            items,
            page,
            total,
            total_pages,
        } => {
            for book in items {
                out.write(&book_line(book, quiet));
            }
            if !quiet {
                out.info(&format!("Page {page} of {total_pages} ({total} books)"));
            }
        }
    }
}

fn affordance_line(affordance: &EmptyAffordance, taxonomy: &TaxonomyCache) -> String {
    match affordance {
        EmptyAffordance::ClearAll => "  • Clear all filters".to_string(),
        EmptyAffordance::RemoveFilter { kind, id } => {
            let name = taxonomy
                .tag_by_id(id)
                .map_or(id.as_str(), |tag| tag.display_name.as_str());
            format!("  • Remove {kind} filter: {name}")
        }
        EmptyAffordance::NotifyMe => "  • Notify me when a match is added".to_string(),
    }
}
