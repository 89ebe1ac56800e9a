//! Member commands - library, recommendations, and heart/save/TBR
//!
//! These endpoints need a signed-in session. The cookie comes from the
//! `session_cookie` setting; without it the API answers 401.

use super::{Context, Result};
use crate::api::{InteractionType, LibraryFilter, VaultClient};
use crate::cli::InteractionArgs;
use crate::output;

/// List one page of the member library
///
/// # Errors
///
/// Returns `VaultError::ApiError` if the request fails.
pub fn library(
    client: &VaultClient,
    filter: LibraryFilter,
    page: u32,
    ctx: &Context<'_>,
) -> Result<()> {
    let library = client.library(filter, page.max(1), ctx.config.page_size)?;

    if library.items.is_empty() {
        if !ctx.quiet {
            ctx.out.info("Nothing on this shelf yet.");
        }
        return Ok(());
    }

    for item in &library.items {
        ctx.out.write(&output::book_line(&item.book, ctx.quiet));
    }
    if !ctx.quiet {
        ctx.out.info(&format!(
            "Page {} of {} ({} books)",
            library.page, library.total_pages, library.total
        ));
    }
    Ok(())
}

/// Show personalized recommendations
///
/// # Errors
///
/// Returns `VaultError::ApiError` if the request fails.
pub fn recommendations(client: &VaultClient, ctx: &Context<'_>) -> Result<()> {
    let recommendations = client.recommendations()?;
    let books = recommendations.books();

    if books.is_empty() {
        if !ctx.quiet {
            let message = recommendations
                .message
                .as_deref()
                .unwrap_or("No recommendations yet. Heart a few books first.");
            ctx.out.info(message);
        }
        return Ok(());
    }

    for book in books {
        ctx.out.write(&output::book_line(book, ctx.quiet));
    }
    Ok(())
}

/// Add or remove a heart/save/TBR interaction
///
/// # Errors
///
/// Returns `VaultError::ApiError` if the request fails.
pub fn interact(
    client: &VaultClient,
    kind: InteractionType,
    args: &InteractionArgs,
    ctx: &Context<'_>,
) -> Result<()> {
    if args.remove {
        client.remove_interaction(kind, &args.book_id)?;
    } else {
        client.add_interaction(kind, &args.book_id)?;
    }

    if !ctx.quiet {
        let verb = if args.remove { "Removed" } else { "Added" };
        let preposition = if args.remove { "from" } else { "to" };
        ctx.out
            .success(&format!("{verb} {kind} {preposition} {}", args.book_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;
    use crate::output::{BufferWriter, MessageLevel};
    use mockito::{Matcher, Server};

    fn ctx<'a>(config: &'a VaultConfig, out: &'a BufferWriter, quiet: bool) -> Context<'a> {
        Context { config, out, quiet }
    }

    #[test]
    fn test_recommendations_empty_uses_server_message() {
        let mut server = Server::new();
        server
            .mock("GET", "/api/recommendations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"recommendations": [], "message": "Heart 3 books to unlock picks"}"#)
            .create();
        let client = VaultClient::new(&server.url()).unwrap();
        let config = VaultConfig::default();
        let out = BufferWriter::new();

        recommendations(&client, &ctx(&config, &out, false)).unwrap();
        assert_eq!(out.text(), "Heart 3 books to unlock picks");
    }

    #[test]
    fn test_library_quiet_prints_slugs() {
        let mut server = Server::new();
        server
            .mock("GET", "/api/my/library")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"page": 1, "pageSize": 24, "total": 2, "totalPages": 1, "items": [
                    {"book": {"id": "1", "slug": "one", "title": "One"}},
                    {"book": {"id": "2", "slug": "two", "title": "Two"}}
                ]}"#,
            )
            .create();
        let client = VaultClient::new(&server.url()).unwrap();
        let config = VaultConfig::default();
        let out = BufferWriter::new();

        library(&client, LibraryFilter::All, 1, &ctx(&config, &out, true)).unwrap();
        assert_eq!(out.text(), "one\ntwo");
    }

    #[test]
    fn test_interact_reports_removal() {
        let mut server = Server::new();
        server
            .mock("DELETE", "/api/interactions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true}"#)
            .create();
        let client = VaultClient::new(&server.url()).unwrap();
        let config = VaultConfig::default();
        let out = BufferWriter::new();
        let args = InteractionArgs {
            book_id: "b7".to_string(),
            remove: true,
        };

        interact(&client, InteractionType::Save, &args, &ctx(&config, &out, false)).unwrap();
        let messages = out.messages();
        assert_eq!(messages[0].0, MessageLevel::Success);
        assert_eq!(messages[0].1, "Removed save from b7");
    }
}
