//! Store capabilities consumed by the loader.
//!
//! Each method is one query. Implementations must not retry, page, or split
//! a call into several statements.

use crate::LoadResult;
use mmkt_model::{Bag, BagRow, Root};
use mmkt_types::{Criteria, PageRequest};

/// Loads roots with every to-one relationship populated.
pub trait RootExecutor<R: Root> {
    /// One join-fetch query over the roots matching `criteria`.
    ///
    /// Without a window the result is ordered by id. With a window the
    /// request's sort applies, ties broken by id, then offset/limit.
    /// Bag relationships are left empty.
    fn fetch_roots(&self, criteria: &Criteria, window: Option<&PageRequest>)
    -> LoadResult<Vec<R>>;

    /// One join-fetch query for a single root.
    fn fetch_root(&self, id: &R::Id) -> LoadResult<Option<R>>;

    /// Counts the roots matching `criteria` without the to-one joins.
    fn count_roots(&self, criteria: &Criteria) -> LoadResult<u64>;
}

/// Loads one bag relationship for a set of roots.
pub trait BagExecutor<R: Root, B: Bag<R>> {
    /// One identifier-set query returning a row per (root, element) pair.
    ///
    /// Row order is unspecified. Roots with an empty bag yield no rows.
    fn fetch_bag(&self, bag: &B, ids: &[R::Id]) -> LoadResult<Vec<BagRow<R::Id, B::Item>>>;
}
