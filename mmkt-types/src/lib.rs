//! Core type definitions for the money-market deal store.
//!
//! This crate defines the request-shaping types shared by the loader, the
//! SQLite store and the HTTP layer:
//! - Page requests, sort orders and the paginated result envelope
//! - Equality filter criteria applied to root queries
//!
//! Entity types and relationship contracts live in `mmkt-model`.

mod criteria;
mod page;

pub use criteria::{Criteria, Criterion, FilterValue};
pub use page::{Direction, Order, Page, PageMeta, PageRequest, Sort};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building request types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("invalid sort: {0}")]
    InvalidSort(String),
}
