//! SQLite-backed executor for every entity family.

use crate::query::{self, Statement};
use crate::schema;
use crate::{SqlBag, SqlRoot, StorageError, StorageResult, StoreConfig};
use mmkt_loader::{BagExecutor, LoadResult, RootExecutor};
use mmkt_model::BagRow;
use mmkt_types::{Criteria, PageRequest};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Persistent store for the deal entities backed by SQLite.
///
/// Cloning shares the underlying connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the store described by `config` and migrates it.
    pub fn open(config: &StoreConfig) -> StorageResult<Self> {
        let conn = match &config.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                Connection::open(path)?
            }
            None => Connection::open_in_memory()?,
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        rusqlite::vtab::array::load_module(&conn)?;
        conn.set_prepared_statement_cache_capacity(64);

        let applied = schema::migrate(&conn)?;
        info!(
            path = ?config.path,
            migrations = applied,
            version = schema::SCHEMA_VERSION,
            "Opened deal store"
        );
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens (or creates) a store at `path`.
    pub fn open_path(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open(&StoreConfig::at(path))
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Runs raw SQL, e.g. fixture or import scripts.
    pub fn execute_batch(&self, sql: &str) -> StorageResult<()> {
        self.with_conn(|conn| Ok(conn.execute_batch(sql)?))
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> StorageResult<u32> {
        self.with_conn(|conn| Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?))
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StorageResult<T>) -> StorageResult<T> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&conn)
    }
}

impl<R: SqlRoot> RootExecutor<R> for SqliteStore {
    fn fetch_roots(&self, criteria: &Criteria, window: Option<&PageRequest>) -> LoadResult<Vec<R>> {
        let Statement { sql, params } = query::select_roots::<R>(criteria, window)?;
        let roots = self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            let roots = stmt
                .query_map(params_from_iter(params.iter()), R::from_row)?
                .collect::<rusqlite::Result<Vec<R>>>()?;
            Ok(roots)
        })?;
        debug!(table = R::TABLE, rows = roots.len(), "Fetched roots");
        Ok(roots)
    }

    fn fetch_root(&self, id: &R::Id) -> LoadResult<Option<R>> {
        let Statement { sql, params } = query::select_root::<R>(*id);
        let root = self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            Ok(stmt
                .query_row(params_from_iter(params.iter()), R::from_row)
                .optional()?)
        })?;
        Ok(root)
    }

    fn count_roots(&self, criteria: &Criteria) -> LoadResult<u64> {
        let Statement { sql, params } = query::count_roots::<R>(criteria)?;
        let count: i64 = self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            Ok(stmt.query_row(params_from_iter(params.iter()), |row| row.get(0))?)
        })?;
        debug!(table = R::TABLE, count, "Counted roots");
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl<R, B> BagExecutor<R, B> for SqliteStore
where
    R: SqlRoot,
    B: SqlBag<R>,
{
    fn fetch_bag(&self, bag: &B, ids: &[R::Id]) -> LoadResult<Vec<BagRow<R::Id, B::Item>>> {
        let sql = bag.fetch_sql();
        let ids: Rc<Vec<Value>> = Rc::new(ids.iter().copied().map(Value::Integer).collect());
        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt
                .query_map(params![ids], |row| {
                    Ok(BagRow::new(row.get(0)?, bag.item_from_row(row)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;
        debug!(
            table = R::TABLE,
            bag = bag.name(),
            rows = rows.len(),
            "Fetched bag rows"
        );
        Ok(rows)
    }
}
