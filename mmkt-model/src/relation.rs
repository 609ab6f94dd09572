//! Relationship contracts shared by the loader and the store.

use std::fmt;
use std::hash::Hash;

/// A persisted aggregate loaded as the root of a query.
///
/// Identifiers must be unique within one result sequence; the loader relies
/// on that to put bag rows back onto the right root.
pub trait Root {
    type Id: Eq + Hash + Clone + fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Descriptor for one multi-valued ("bag") relationship of `R`.
///
/// A bag is unordered and may be empty. Bags are loaded one at a time, so a
/// descriptor only needs to know how to replace its own collection.
pub trait Bag<R: Root> {
    type Item;

    /// Stable relationship name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Replaces the root's collection with `items`.
    fn attach(&self, root: &mut R, items: Vec<Self::Item>);
}

/// One (root, element) pair from a batch bag query.
///
/// A root appears once per element; roots with an empty bag do not appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagRow<Id, T> {
    pub root_id: Id,
    pub item: T,
}

impl<Id, T> BagRow<Id, T> {
    pub const fn new(root_id: Id, item: T) -> Self {
        Self { root_id, item }
    }
}
