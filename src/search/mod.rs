//! Search pipeline
//!
//! From filter state to rendered results:
//! 1. [`compose`] derives the request parameters using the taxonomy
//! 2. [`ResultPager`] issues ticketed page requests and keeps only the latest
//!    response
//! 3. [`SearchDebouncer`] holds back free-text edits until typing pauses

pub mod compose;
pub mod debounce;
pub mod error;
pub mod pager;

pub use compose::{SearchFlag, SearchParams, compose, select_include, toggle_include_in};
pub use debounce::{DEFAULT_QUIET_PERIOD, DebounceState, DebounceToken, SearchDebouncer};
pub use error::SearchError;
pub use pager::{
    DEFAULT_PAGE_SIZE, EmptyAffordance, PageRequest, PagerStatus, RequestTicket, ResultPager,
    ResultsView, empty_affordances,
};
