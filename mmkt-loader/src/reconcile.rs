//! Splices batch-fetched bag rows back onto their roots.

use crate::{IdentityIndex, LoadError, LoadResult, MismatchPolicy};
use mmkt_model::{Bag, BagRow, Root};
use tracing::warn;

/// Attaches `rows` to `roots`, indexing `roots` first.
///
/// See [`reconcile_indexed`].
pub fn reconcile<R, B>(
    roots: Vec<R>,
    rows: Vec<BagRow<R::Id, B::Item>>,
    bag: &B,
    policy: MismatchPolicy,
) -> LoadResult<Vec<R>>
where
    R: Root,
    B: Bag<R>,
{
    let index = IdentityIndex::build(&roots);
    reconcile_indexed(roots, &index, rows, bag, policy)
}

/// Attaches `rows` to `roots` using an index built over `roots`.
///
/// Every root is emitted exactly once, in its original position, with its
/// bag replaced by the rows that name it (in row order). Roots without rows
/// get an empty bag. Rows naming an unindexed root are handled per `policy`.
pub fn reconcile_indexed<R, B>(
    roots: Vec<R>,
    index: &IdentityIndex<R::Id>,
    rows: Vec<BagRow<R::Id, B::Item>>,
    bag: &B,
    policy: MismatchPolicy,
) -> LoadResult<Vec<R>>
where
    R: Root,
    B: Bag<R>,
{
    debug_assert_eq!(roots.len(), index.len(), "index built over other roots");

    let mut groups: Vec<Vec<B::Item>> = Vec::with_capacity(roots.len());
    groups.resize_with(roots.len(), Vec::new);

    let mut dropped = 0usize;
    for row in rows {
        match index.position(&row.root_id) {
            Some(position) => groups[position].push(row.item),
            None => {
                let mismatch = LoadError::ReconciliationMismatch {
                    bag: bag.name(),
                    root_id: format!("{:?}", row.root_id),
                };
                if policy == MismatchPolicy::Fail {
                    return Err(mismatch);
                }
                warn!(bag = bag.name(), error = %mismatch, "Dropping bag row");
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        warn!(bag = bag.name(), dropped, "Bag rows dropped during reconciliation");
    }

    Ok(roots
        .into_iter()
        .zip(groups)
        .map(|(mut root, items)| {
            bag.attach(&mut root, items);
            root
        })
        .collect())
}
