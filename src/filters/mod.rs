//! Filter state module
//!
//! This module holds the canonical representation of what the user is
//! searching for and keeps it in the page URL so searches are shareable and
//! bookmarkable.
//!
//! # Features
//!
//! - **`FilterState`**: free-text query, include/exclude/safety id sets, two
//!   toggles and a sort key
//! - **Query string codec**: bit-exact serialization for shareable links
//! - **`FilterStore`**: read/patch/toggle operations over a `Location`, with
//!   subscriptions for re-render triggers
//!
//! # Examples
//!
//! ```
//! use bookvault::filters::{FilterPatch, FilterState, FilterStore, MemoryLocation, SortKey};
//!
//! let mut store = FilterStore::new(MemoryLocation::new(""));
//! store.update(FilterPatch::new().query("slow burn").sort(SortKey::Heat));
//!
//! let shared = store.location().query().to_string();
//! assert_eq!(shared, "q=slow+burn&sort=heat");
//! assert_eq!(FilterState::from_query_string(&shared), store.current());
//! ```

pub mod query_string;
pub mod store;
pub mod types;

pub use store::{FilterStore, Location, MemoryLocation, SubscriptionId};
pub use types::{FilterKind, FilterPatch, FilterState, SortKey};
