use mmkt_model::Root;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Identifier → position map over one root sequence.
///
/// Built once per load from the root query's output and dropped once the
/// bag rows are reconciled. Also keeps the identifiers in order, which is the
/// key set of the bag query.
#[derive(Debug, Clone)]
pub struct IdentityIndex<Id> {
    positions: HashMap<Id, usize>,
    ids: Vec<Id>,
}

impl<Id> IdentityIndex<Id>
where
    Id: Eq + Hash + Clone + fmt::Debug,
{
    /// Indexes `roots` by identifier. Identifiers must be unique.
    pub fn build<R>(roots: &[R]) -> Self
    where
        R: Root<Id = Id>,
    {
        let mut positions = HashMap::with_capacity(roots.len());
        let mut ids = Vec::with_capacity(roots.len());
        for (position, root) in roots.iter().enumerate() {
            let id = root.id().clone();
            let previous = positions.insert(id.clone(), position);
            debug_assert!(previous.is_none(), "duplicate root id {id:?}");
            ids.push(id);
        }
        Self { positions, ids }
    }

    /// Position of `id` in the indexed sequence.
    #[must_use]
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Identifiers in original order.
    #[must_use]
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
