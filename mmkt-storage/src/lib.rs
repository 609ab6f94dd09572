//! SQLite storage layer for the money-market deal store.
//!
//! Implements the loader's executor capabilities for every entity family:
//! - Root queries join every to-one relationship in one statement
//! - Count queries run over the root table alone
//! - Bag queries select one bag for a whole id set via `rarray(?1)`
//!
//! # Architecture
//!
//! - [`SqlRoot`] describes a family's root table, join query and row mapping
//! - [`SqlBag`] describes one bag's link-table query and element mapping
//! - [`SqliteStore`] owns the connection and applies versioned migrations on open

mod config;
mod entities;
mod error;
mod mapping;
mod query;
mod schema;
mod store;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use mapping::{ColumnKind, Field, SqlBag, SqlRoot};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
