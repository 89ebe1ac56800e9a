//! Integration tests for bookvault
//!
//! These tests run the HTTP client against a local mock server and drive the
//! complete flow from a pasted Vault URL to a page of results.

use bookvault::api::{ApiError, InteractionType, LibraryFilter, VaultApi, VaultClient};
use bookvault::config::VaultConfig;
use bookvault::filters::{FilterStore, MemoryLocation, query_string};
use bookvault::presets::{active_preset, apply_preset, find_preset};
use bookvault::search::{ResultPager, ResultsView, SearchParams, compose, toggle_include_in};
use bookvault::taxonomy::{TaxonomyCache, TaxonomyError};
use mockito::{Matcher, Server};
use serde_json::json;
use std::collections::BTreeSet;
use tempfile::TempDir;

const TAXONOMY_JSON: &str = r#"{
    "categories": [
        {"slug": "pairing", "display_name": "Pairing", "single_select": true, "display_order": 2},
        {"slug": "trope", "display_name": "Tropes", "display_order": 5},
        {"slug": "tone", "display_name": "Tone", "display_order": 6},
        {"slug": "safety", "display_name": "Safety Shields", "display_order": 4},
        {"slug": "content_warning", "display_name": "Content Warnings", "display_order": 7}
    ],
    "tags": [
        {"id": "t-mf", "slug": "mf", "display_name": "M/F", "category": "pairing", "display_order": 1},
        {"id": "t-mm", "slug": "mm", "display_name": "M/M", "category": "pairing", "display_order": 2},
        {"id": "t-etl", "slug": "enemies_to_lovers", "display_name": "Enemies to Lovers", "category": "trope"},
        {"id": "t-burn", "slug": "slow_burn", "display_name": "Slow Burn", "category": "trope"},
        {"id": "t-cozy", "slug": "cozy_comfort_read", "display_name": "Cozy Comfort Read", "category": "tone"},
        {"id": "t-hea", "slug": "guaranteed_hea", "display_name": "Guaranteed HEA", "category": "safety"},
        {"id": "t-angst", "slug": "low_angst", "display_name": "Low Angst", "category": "safety"},
        {"id": "t-comm", "slug": "good_communication", "display_name": "Good Communication", "category": "safety"},
        {"id": "t-cheat", "slug": "cheating", "display_name": "Cheating", "category": "content_warning", "sensitive_flag": true}
    ]
}"#;

fn books_json(page: u32, total: u64, titles: &[&str]) -> String {
    let items: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "id": format!("b{i}"),
                "slug": title.to_lowercase().replace(' ', "-"),
                "title": title,
                "publishedYear": 2022,
                "authors": [{"id": "a1", "name": "Ada Lane", "slug": "ada-lane"}],
                "tags": []
            })
        })
        .collect();
    let total_pages = total.div_ceil(24);
    json!({
        "page": page,
        "pageSize": 24,
        "total": total,
        "totalPages": total_pages,
        "items": items
    })
    .to_string()
}

fn taxonomy_mock(server: &mut Server) -> mockito::Mock {
    server
        .mock("GET", "/api/tags")
        .match_query(Matcher::UrlEncoded(
            "include_sensitive".into(),
            "true".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TAXONOMY_JSON)
        .create()
}

#[test]
fn test_taxonomy_fetch_builds_indices() {
    let mut server = Server::new();
    let mock = taxonomy_mock(&mut server);
    let client = VaultClient::new(&server.url()).unwrap();

    let taxonomy = TaxonomyCache::load(&client, true);

    mock.assert();
    assert!(taxonomy.require_loaded().is_ok());
    assert_eq!(taxonomy.categories()[0].slug, "pairing");
    assert_eq!(taxonomy.tag_by_slug("cheating").unwrap().id, "t-cheat");
    let pairing: Vec<&str> = taxonomy
        .tags_by_category("pairing")
        .iter()
        .map(|t| t.slug.as_str())
        .collect();
    assert_eq!(pairing, vec!["mf", "mm"]);
}

#[test]
fn test_taxonomy_failure_yields_failed_cache() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/tags")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Failed to fetch tags"}"#)
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let taxonomy = TaxonomyCache::load(&client, false);

    mock.assert();
    assert!(taxonomy.is_failed());
    assert!(taxonomy.categories().is_empty());
    assert!(matches!(
        taxonomy.require_loaded(),
        Err(TaxonomyError::Unavailable(_))
    ));
}

#[test]
fn test_search_sends_wire_parameters() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/books")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "duke".into()),
            Matcher::UrlEncoded("tags".into(), "enemies_to_lovers,slow_burn".into()),
            Matcher::UrlEncoded("excludeTags".into(), "cheating".into()),
            Matcher::UrlEncoded("df".into(), "hea,ku".into()),
            Matcher::UrlEncoded("sort".into(), "heat".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("pageSize".into(), "24".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(books_json(2, 30, &["Bright Duke"]))
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let params = SearchParams {
        query: Some("duke".to_string()),
        tags: BTreeSet::from(["slow_burn".to_string(), "enemies_to_lovers".to_string()]),
        exclude_tags: BTreeSet::from(["cheating".to_string()]),
        flags: BTreeSet::from([
            bookvault::search::SearchFlag::KindleUnlimited,
            bookvault::search::SearchFlag::GuaranteedHea,
        ]),
        sort: Some(bookvault::filters::SortKey::Heat),
    };
    let page = client.search_books(&params, 2, 24).unwrap();

    mock.assert();
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].title, "Bright Duke");
}

#[test]
fn test_search_error_status_carries_server_message() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/books")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Search is warming up"}"#)
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let err = client
        .search_books(&SearchParams::default(), 1, 24)
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Search is warming up"));
}

#[test]
fn test_book_by_slug() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/books/the-bright-duke")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "book": {
                    "id": "b1",
                    "slug": "the-bright-duke",
                    "title": "The Bright Duke",
                    "description": "A duke, a bet, a very long winter.",
                    "publishedYear": 2021,
                    "authors": [],
                    "tags": [],
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-02-01T00:00:00Z"
                }
            })
            .to_string(),
        )
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let detail = client.book_by_slug("the-bright-duke").unwrap();

    mock.assert();
    assert_eq!(detail.item.title, "The Bright Duke");
    assert_eq!(detail.item.author_names(), "Unknown Author");
}

#[test]
fn test_missing_book_is_a_404() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/books/nope")
        .with_status(404)
        .with_body(r#"{"error": "Book not found"}"#)
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let err = client.book_by_slug("nope").unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[test]
fn test_interaction_posts_body_with_cookie() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/interactions")
        .match_header("cookie", "ghost-members-ssr=abc")
        .match_body(Matcher::Json(json!({"type": "heart", "bookId": "b1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();
    let client = VaultClient::new(&server.url())
        .unwrap()
        .with_session_cookie("ghost-members-ssr=abc");

    client.add_interaction(InteractionType::Heart, "b1").unwrap();
    mock.assert();
}

#[test]
fn test_interaction_delete_without_session_is_unauthorized() {
    let mut server = Server::new();
    server
        .mock("DELETE", "/api/interactions")
        .with_status(401)
        .with_body(r#"{"error": "Unauthorized"}"#)
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let err = client
        .remove_interaction(InteractionType::Tbr, "b1")
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn test_library_query() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/my/library")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter".into(), "tbr".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("pageSize".into(), "12".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "page": 1, "pageSize": 12, "total": 1, "totalPages": 1, "filter": "tbr",
                "items": [{
                    "book": {"id": "b1", "slug": "one", "title": "One"},
                    "interactionType": "tbr",
                    "createdAt": "2024-03-01T12:00:00Z"
                }]
            })
            .to_string(),
        )
        .create();
    let client = VaultClient::new(&server.url()).unwrap();

    let library = client.library(LibraryFilter::Tbr, 1, 12).unwrap();

    mock.assert();
    assert_eq!(library.items.len(), 1);
    assert_eq!(library.items[0].book.title, "One");
}

#[test]
fn test_url_to_results_flow() {
    let mut server = Server::new();
    let taxonomy_mock = taxonomy_mock(&mut server);
    let books_mock = server
        .mock("GET", "/api/books")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tags".into(), "mm,slow_burn".into()),
            Matcher::UrlEncoded("df".into(), "low_angst".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(books_json(1, 2, &["Winter Harbor", "Second Chances"]))
        .create();
    let client = VaultClient::new(&server.url()).unwrap();
    let taxonomy = TaxonomyCache::load(&client, true);

    let pasted = "https://bookshook.com/vault?include=t-mf%2Ct-burn&safety=t-angst&sort=newest";
    let mut store = FilterStore::new(MemoryLocation::new(&query_string::query_from_input(
        pasted,
    )));
    toggle_include_in(&mut store, &taxonomy, "t-mm");

    let state = store.current();
    assert!(!state.include.contains("t-mf"));
    assert_eq!(
        store.location().query(),
        "include=t-burn%2Ct-mm&safety=t-angst"
    );

    let mut pager = ResultPager::new(24);
    let request = pager.set_params(compose(&state, &taxonomy)).unwrap();
    assert!(pager.run(&request, &client));

    taxonomy_mock.assert();
    books_mock.assert();
    match pager.view(&state) {
        ResultsView::Results { items, total, .. } => {
            assert_eq!(total, 2);
            assert_eq!(items[0].title, "Winter Harbor");
        }
        other => panic!("expected results, got {other:?}"),
    }
}

#[test]
fn test_preset_round_trip_through_url() {
    let mut server = Server::new();
    taxonomy_mock(&mut server);
    let client = VaultClient::new(&server.url()).unwrap();
    let taxonomy = TaxonomyCache::load(&client, true);

    let mut store = FilterStore::new(MemoryLocation::new("q=duke"));
    let preset = find_preset("comfort-read").unwrap();
    apply_preset(&mut store, &taxonomy, preset);

    let reopened = FilterStore::new(MemoryLocation::new(store.location().query()));
    let state = reopened.current();
    assert!(state.query.is_empty());
    assert_eq!(
        active_preset(&state, &taxonomy).map(|p| p.id),
        Some("comfort-read")
    );
}

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookvault").join("config.toml");

    let mut config = VaultConfig::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config, VaultConfig::default());

    config
        .set_value("api_base_url", "http://localhost:3000/")
        .unwrap();
    config.set_value("include_sensitive", "false").unwrap();
    config.save_to(&path).unwrap();

    let reloaded = VaultConfig::load_from(&path).unwrap();
    assert_eq!(reloaded.api_base_url, "http://localhost:3000");
    assert!(!reloaded.include_sensitive);
    assert!(VaultClient::from_config(&reloaded).is_ok());
}
