//! The load pipeline: roots, index, bag batch fetch, reconcile, envelope.

use crate::{
    BagExecutor, IdentityIndex, LoadResult, LoaderConfig, RootExecutor, fetch_bag_rows,
    preserve_envelope, reconcile_indexed,
};
use mmkt_model::{Bag, Root};
use mmkt_types::{Criteria, Page, PageRequest};
use tracing::debug;

/// Loads roots of any family together with one of their bags.
///
/// Each call runs the stages in order and issues at most one query per
/// stage (plus the count query for paged loads). No state survives a call,
/// so one loader can serve concurrent requests if the executor can.
#[derive(Debug)]
pub struct RelationLoader<'a, X: ?Sized> {
    executor: &'a X,
    config: LoaderConfig,
}

impl<'a, X: ?Sized> RelationLoader<'a, X> {
    /// Creates a loader with the default configuration.
    pub fn new(executor: &'a X) -> Self {
        Self::with_config(executor, LoaderConfig::default())
    }

    pub fn with_config(executor: &'a X, config: LoaderConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Every root, ordered by id, each with `bag` populated.
    pub fn load_all_with_bag<R, B>(&self, bag: &B) -> LoadResult<Vec<R>>
    where
        R: Root,
        B: Bag<R>,
        X: RootExecutor<R> + BagExecutor<R, B>,
    {
        self.load_all_matching_with_bag(&Criteria::none(), bag)
    }

    /// Every root matching `criteria`, ordered by id, with `bag` populated.
    pub fn load_all_matching_with_bag<R, B>(
        &self,
        criteria: &Criteria,
        bag: &B,
    ) -> LoadResult<Vec<R>>
    where
        R: Root,
        B: Bag<R>,
        X: RootExecutor<R> + BagExecutor<R, B>,
    {
        let roots = self.executor.fetch_roots(criteria, None)?;
        debug!(bag = bag.name(), roots = roots.len(), "Roots loaded");
        self.populate(roots, bag)
    }

    /// The root with `id`, if any, with `bag` populated.
    pub fn load_one_with_bag<R, B>(&self, id: &R::Id, bag: &B) -> LoadResult<Option<R>>
    where
        R: Root,
        B: Bag<R>,
        X: RootExecutor<R> + BagExecutor<R, B>,
    {
        let Some(root) = self.executor.fetch_root(id)? else {
            debug!(bag = bag.name(), id = ?id, "Root not found");
            return Ok(None);
        };
        Ok(self.populate(vec![root], bag)?.pop())
    }

    /// One page of roots with `bag` populated.
    pub fn load_page_with_bag<R, B>(&self, bag: &B, request: &PageRequest) -> LoadResult<Page<R>>
    where
        R: Root,
        B: Bag<R>,
        X: RootExecutor<R> + BagExecutor<R, B>,
    {
        self.load_page_matching_with_bag(&Criteria::none(), bag, request)
    }

    /// One page of the roots matching `criteria`, with `bag` populated.
    ///
    /// Offset, limit and total come from the root phase only.
    pub fn load_page_matching_with_bag<R, B>(
        &self,
        criteria: &Criteria,
        bag: &B,
        request: &PageRequest,
    ) -> LoadResult<Page<R>>
    where
        R: Root,
        B: Bag<R>,
        X: RootExecutor<R> + BagExecutor<R, B>,
    {
        self.config.check_page(request)?;
        let page = self.load_root_page(criteria, request)?;
        debug!(
            bag = bag.name(),
            offset = page.offset(),
            limit = page.limit(),
            total = page.total_elements(),
            roots = page.number_of_elements(),
            "Root page loaded"
        );
        preserve_envelope(page, |roots| self.populate(roots, bag))
    }

    fn load_root_page<R>(&self, criteria: &Criteria, request: &PageRequest) -> LoadResult<Page<R>>
    where
        R: Root,
        X: RootExecutor<R>,
    {
        let content = self.executor.fetch_roots(criteria, Some(request))?;
        let total = match known_total(request, content.len()) {
            Some(total) => total,
            None => self.executor.count_roots(criteria)?,
        };
        Ok(Page::new(content, request, total))
    }

    fn populate<R, B>(&self, roots: Vec<R>, bag: &B) -> LoadResult<Vec<R>>
    where
        R: Root,
        B: Bag<R>,
        X: BagExecutor<R, B>,
    {
        let index = IdentityIndex::build(&roots);
        let rows = fetch_bag_rows::<R, B, X>(self.executor, bag, &index)?;
        reconcile_indexed(roots, &index, rows, bag, self.config.mismatch_policy)
    }
}

/// Total implied by the content query alone, if it is.
///
/// A short page is the last one: its total is `offset + len`. An empty page
/// past the first says nothing, nor does a full page.
fn known_total(request: &PageRequest, len: usize) -> Option<u64> {
    let len = len as u64;
    if len >= u64::from(request.limit()) {
        return None;
    }
    if request.offset() == 0 || len > 0 {
        return Some(request.offset() + len);
    }
    None
}
