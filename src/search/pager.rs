//! Result pager
//!
//! Owns the page number and the visible result set for the current
//! [`SearchParams`]. Every request the pager issues carries a
//! [`RequestTicket`]; only the response for the most recently issued ticket
//! is ever applied, so a slow response for old filters can never overwrite
//! the results of newer ones.

use super::compose::SearchParams;
use crate::api::{ApiError, BookListItem, BooksPage, VaultApi};
use crate::filters::{FilterKind, FilterState};
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Generation number of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// A search request the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: RequestTicket,
    pub params: SearchParams,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PagerStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// What the results area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing requested yet
    Idle,
    Loading,
    /// The request failed; retry is available
    Error { message: String },
    /// The request succeeded with zero matches
    Empty { affordances: Vec<EmptyAffordance> },
    Results {
        items: Vec<BookListItem>,
        page: u32,
        total: u64,
        total_pages: u32,
    },
}

/// Ways out of an empty result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyAffordance {
    ClearAll,
    RemoveFilter { kind: FilterKind, id: String },
    NotifyMe,
}

/// Affordances offered when a search matched nothing
///
/// `ClearAll` only when something is active, one `RemoveFilter` per active
/// tag id, and always `NotifyMe`.
#[must_use]
pub fn empty_affordances(state: &FilterState) -> Vec<EmptyAffordance> {
    let mut affordances = Vec::new();
    if !state.is_default() {
        affordances.push(EmptyAffordance::ClearAll);
    }
    for kind in FilterKind::ALL {
        affordances.extend(state.ids(kind).iter().map(|id| EmptyAffordance::RemoveFilter {
            kind,
            id: id.clone(),
        }));
    }
    affordances.push(EmptyAffordance::NotifyMe);
    affordances
}

/// Paged, race-free view over search results
#[derive(Debug, Clone)]
pub struct ResultPager {
    params: Option<SearchParams>,
    page: u32,
    page_size: u32,
    generation: u64,
    last_request: Option<PageRequest>,
    items: Vec<BookListItem>,
    total: u64,
    total_pages: u32,
    status: PagerStatus,
}

impl Default for ResultPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResultPager {
    /// A page size of zero falls back to [`DEFAULT_PAGE_SIZE`]
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            params: None,
            page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            generation: 0,
            last_request: None,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            status: PagerStatus::Idle,
        }
    }

    /// Switch to new search parameters
    ///
    /// Returns `None` when `params` equals the current parameters. Otherwise
    /// the page goes back to 1 and a request is issued.
    pub fn set_params(&mut self, params: SearchParams) -> Option<PageRequest> {
        if self.params.as_ref() == Some(&params) {
            return None;
        }
        self.params = Some(params);
        self.page = 1;
        Some(self.issue())
    }

    /// Move to another page of the same search; pages below 1 become 1
    pub fn set_page(&mut self, page: u32) -> PageRequest {
        self.page = page.max(1);
        self.issue()
    }

    /// Re-issue the last request under a fresh ticket
    pub fn retry(&mut self) -> Option<PageRequest> {
        let last = self.last_request.as_ref()?;
        self.params = Some(last.params.clone());
        self.page = last.page;
        Some(self.issue())
    }

    fn issue(&mut self) -> PageRequest {
        self.generation += 1;
        let request = PageRequest {
            ticket: RequestTicket(self.generation),
            params: self.params.clone().unwrap_or_default(),
            page: self.page,
            page_size: self.page_size,
        };
        debug!(
            ticket = self.generation,
            page = self.page,
            "search request issued"
        );
        self.status = PagerStatus::Loading;
        self.last_request = Some(request.clone());
        request
    }

    /// Apply a response; returns `false` if the ticket is stale
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<BooksPage, ApiError>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale search response"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.status = PagerStatus::Ready;
            }
            Err(err) => {
                self.items.clear();
                self.total = 0;
                self.total_pages = 0;
                self.status = PagerStatus::Error(err.to_string());
            }
        }
        true
    }

    /// Perform `request` through `api` and apply the response
    pub fn run<A: VaultApi + ?Sized>(&mut self, request: &PageRequest, api: &A) -> bool {
        let result = api.search_books(&request.params, request.page, request.page_size);
        self.complete(request.ticket, result)
    }

    /// What to render, given the filter state the results belong to
    #[must_use]
    pub fn view(&self, state: &FilterState) -> ResultsView {
        match &self.status {
            PagerStatus::Idle => ResultsView::Idle,
            PagerStatus::Loading => ResultsView::Loading,
            PagerStatus::Error(message) => ResultsView::Error {
                message: message.clone(),
            },
            PagerStatus::Ready if self.items.is_empty() => ResultsView::Empty {
                affordances: empty_affordances(state),
            },
            PagerStatus::Ready => ResultsView::Results {
                items: self.items.clone(),
                page: self.page,
                total: self.total,
                total_pages: self.total_pages,
            },
        }
    }

    #[must_use]
    pub const fn status(&self) -> &PagerStatus {
        &self.status
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn items(&self) -> &[BookListItem] {
        &self.items
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }
}
