//! Order-preserving batch relationship loading.
//!
//! Fetching more than one bag relationship per root in a single join query
//! multiplies rows (one per combination of bag elements), and fetching a bag
//! per root issues one query per root. The loader avoids both with a fixed
//! pipeline, one query per stage:
//!
//! 1. **Root load**: roots with every to-one relationship joined, unpaged or
//!    paged (plus an independent count query).
//! 2. **Index**: identifier → original position ([`IdentityIndex`]).
//! 3. **Bag batch fetch**: one identifier-set query for one bag, rows in any
//!    order, empty bags absent ([`fetch_bag_rows`]).
//! 4. **Reconcile**: rows grouped back onto the roots in original order,
//!    empty bags synthesized ([`reconcile`]).
//! 5. **Envelope**: page metadata from stage 1 reattached unchanged
//!    ([`preserve_envelope`]).
//!
//! The store plugs in through [`RootExecutor`] and [`BagExecutor`];
//! [`RelationLoader`] drives the pipeline.

mod config;
mod envelope;
mod error;
mod executor;
mod fetch;
mod index;
mod loader;
mod reconcile;

pub use config::{LoaderConfig, MismatchPolicy};
pub use envelope::preserve_envelope;
pub use error::{LoadError, LoadResult};
pub use executor::{BagExecutor, RootExecutor};
pub use fetch::fetch_bag_rows;
pub use index::IdentityIndex;
pub use loader::RelationLoader;
pub use reconcile::{reconcile, reconcile_indexed};
