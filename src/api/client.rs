//! Blocking HTTP client for the Vault API

use super::error::ApiError;
use super::types::{
    BookDetail, BookDetailResponse, BookInteractions, BookInteractionsResponse, BooksPage,
    ErrorBody, InteractionPayload, InteractionType, LibraryFilter, LibraryPage, Recommendations,
};
use crate::config::VaultConfig;
use crate::search::SearchParams;
use crate::taxonomy::TaxonomyResponse;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, COOKIE};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{ParseError, Url};

/// The two calls the discovery core depends on
///
/// Everything that reads taxonomy or search results goes through this trait
/// so it can be exercised without a network.
pub trait VaultApi {
    /// Fetch the full category/tag vocabulary
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status, or a
    /// malformed body.
    fn fetch_taxonomy(&self, include_sensitive: bool) -> Result<TaxonomyResponse, ApiError>;

    /// Fetch one page of search results
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-success status, or a
    /// malformed body.
    fn search_books(
        &self,
        params: &SearchParams,
        page: u32,
        page_size: u32,
    ) -> Result<BooksPage, ApiError>;
}

/// `reqwest`-backed implementation of [`VaultApi`] plus the member endpoints
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl VaultClient {
    /// Create a client for the given API host
    ///
    /// The base URL may carry a path prefix; endpoint paths are appended to it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute URL, or
    /// `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url)?;
        let http = Client::builder()
            .user_agent(concat!("bookvault/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        })
    }

    /// Create a client from the loaded configuration
    ///
    /// # Errors
    ///
    /// See [`VaultClient::new`].
    pub fn from_config(config: &VaultConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.api_base_url)?;
        Ok(match &config.session_cookie {
            Some(cookie) => client.with_session_cookie(cookie.clone()),
            None => client,
        })
    }

    /// Forward a member session cookie on every request
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }

    /// Endpoint with one extra path segment, percent-encoded
    fn endpoint_with_segment(&self, path: &str, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(segment);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "vault api request");
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| context.to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, url).send()?;
        Self::decode(response, context)
    }

    /// Fetch a single book by slug
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with 404 when the book does not exist.
    pub fn book_by_slug(&self, slug: &str) -> Result<BookDetail, ApiError> {
        let url = self.endpoint_with_segment("/api/books", slug)?;
        let response: BookDetailResponse = self.get_json(url, "Book not found")?;
        Ok(response.book)
    }

    /// Interaction flags the signed-in member has on a book
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the member is not signed in.
    pub fn interactions(&self, book_id: &str) -> Result<BookInteractions, ApiError> {
        let url = self.endpoint_with_segment("/api/interactions", book_id)?;
        let response: BookInteractionsResponse =
            self.get_json(url, "Failed to fetch interactions")?;
        Ok(response.interactions)
    }

    /// Set an interaction on a book
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the member is not signed in.
    pub fn add_interaction(&self, kind: InteractionType, book_id: &str) -> Result<(), ApiError> {
        self.send_interaction(Method::POST, kind, book_id, "Failed to save interaction")
    }

    /// Clear an interaction on a book
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the member is not signed in.
    pub fn remove_interaction(&self, kind: InteractionType, book_id: &str) -> Result<(), ApiError> {
        self.send_interaction(Method::DELETE, kind, book_id, "Failed to delete interaction")
    }

    fn send_interaction(
        &self,
        method: Method,
        kind: InteractionType,
        book_id: &str,
        context: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/api/interactions")?;
        let response = self
            .request(method, url)
            .json(&InteractionPayload { kind, book_id })
            .send()?;
        let _: serde_json::Value = Self::decode(response, context)?;
        Ok(())
    }

    /// One page of the member library
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the member is not signed in.
    pub fn library(
        &self,
        filter: LibraryFilter,
        page: u32,
        page_size: u32,
    ) -> Result<LibraryPage, ApiError> {
        let mut url = self.endpoint("/api/my/library")?;
        url.query_pairs_mut()
            .append_pair("filter", filter.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());
        self.get_json(url, "Failed to fetch library")
    }

    /// Personal recommendations for the signed-in member
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the member is not signed in.
    pub fn recommendations(&self) -> Result<Recommendations, ApiError> {
        let url = self.endpoint("/api/recommendations")?;
        self.get_json(url, "Failed to fetch recommendations")
    }
}

impl VaultApi for VaultClient {
    fn fetch_taxonomy(&self, include_sensitive: bool) -> Result<TaxonomyResponse, ApiError> {
        let mut url = self.endpoint("/api/tags")?;
        if include_sensitive {
            url.query_pairs_mut().append_pair("include_sensitive", "true");
        }
        self.get_json(url, "Failed to fetch tags")
    }

    fn search_books(
        &self,
        params: &SearchParams,
        page: u32,
        page_size: u32,
    ) -> Result<BooksPage, ApiError> {
        let mut url = self.endpoint("/api/books")?;
        url.query_pairs_mut()
            .extend_pairs(params.to_query_pairs(page, page_size));
        self.get_json(url, "Failed to fetch books")
    }
}
