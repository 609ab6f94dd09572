use crate::{BagExecutor, IdentityIndex, LoadResult};
use mmkt_model::{Bag, BagRow, Root};
use tracing::debug;

/// Fetches `bag` for every indexed root with a single query.
///
/// An empty index issues no query at all.
pub fn fetch_bag_rows<R, B, X>(
    executor: &X,
    bag: &B,
    index: &IdentityIndex<R::Id>,
) -> LoadResult<Vec<BagRow<R::Id, B::Item>>>
where
    R: Root,
    B: Bag<R>,
    X: BagExecutor<R, B> + ?Sized,
{
    if index.is_empty() {
        debug!(bag = bag.name(), "No roots loaded, skipping bag query");
        return Ok(Vec::new());
    }
    let rows = executor.fetch_bag(bag, index.ids())?;
    debug!(
        bag = bag.name(),
        roots = index.len(),
        rows = rows.len(),
        "Bag batch fetched"
    );
    Ok(rows)
}
