//! Client for the remote Vault HTTP API
//!
//! The discovery core only ever calls two endpoints: the taxonomy listing and
//! the paged book search. Both sit behind the [`VaultApi`] trait. The member
//! endpoints (book detail, interactions, library, recommendations) share the
//! same [`BookListItem`] shape and are exposed as inherent methods on
//! [`VaultClient`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{VaultApi, VaultClient};
pub use error::ApiError;
pub use types::{
    Author, BookDetail, BookInteractions, BookListItem, BookTag, BooksPage, InteractionType,
    LibraryFilter, LibraryItem, LibraryPage, RecommendationItem, Recommendations,
};
