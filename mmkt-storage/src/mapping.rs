//! Table and row mapping for roots and bags.

use mmkt_model::{AppUser, Authorities, Authority, Bag, EntityRef, Placeholder, Placeholders, Root};
use rusqlite::Row;
use rusqlite::types::Type;

/// A root family stored in its own table.
///
/// `SELECT` must select from `TABLE` aliased as `e`, join every to-one
/// relationship and end without a `WHERE` clause; the store appends the
/// filter, order and window.
pub trait SqlRoot: Root<Id = i64> + Sized {
    /// Root table name. Link tables are named `<TABLE>_<bag>`.
    const TABLE: &'static str;

    /// Join-fetch query over the root table.
    const SELECT: &'static str;

    /// Filterable and sortable fields of the root table.
    const FIELDS: &'static [Field];

    /// Maps one row of [`SqlRoot::SELECT`]. Bags are left empty.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Storage class of a root column, used to bind filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    /// Stored as 0/1.
    Bool,
    /// Text, including ISO dates and enum names.
    Text,
}

/// A filterable and sortable root column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Public (camelCase) name.
    pub name: &'static str,
    /// Qualified column, e.g. `e.login`.
    pub column: &'static str,
    pub kind: ColumnKind,
}

impl Field {
    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn bool(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: ColumnKind::Bool,
        }
    }

    pub const fn text(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: ColumnKind::Text,
        }
    }

    /// Whether `field` names this column by public or bare column name.
    pub fn matches(&self, field: &str) -> bool {
        self.name == field || self.column.strip_prefix("e.") == Some(field)
    }
}

/// A bag stored behind a link table.
pub trait SqlBag<R: SqlRoot>: Bag<R> {
    /// Query selecting the owning root id first, then the element columns,
    /// for every root id in `rarray(?1)`.
    fn fetch_sql(&self) -> String;

    /// Maps the element columns of one row, starting at column 1.
    fn item_from_row(&self, row: &Row<'_>) -> rusqlite::Result<Self::Item>;
}

impl<R> SqlBag<R> for Placeholders
where
    R: SqlRoot,
    Placeholders: Bag<R, Item = Placeholder>,
{
    fn fetch_sql(&self) -> String {
        format!(
            "SELECT l.{t}_id, p.id, p.description, p.token \
             FROM {t}_placeholder l \
             JOIN placeholder p ON p.id = l.placeholder_id \
             WHERE l.{t}_id IN rarray(?1)",
            t = R::TABLE
        )
    }

    fn item_from_row(&self, row: &Row<'_>) -> rusqlite::Result<Placeholder> {
        Ok(Placeholder {
            id: row.get(1)?,
            description: row.get(2)?,
            token: row.get(3)?,
        })
    }
}

impl SqlBag<AppUser> for Authorities {
    fn fetch_sql(&self) -> String {
        "SELECT l.app_user_id, l.authority_name \
         FROM app_user_authority l \
         WHERE l.app_user_id IN rarray(?1)"
            .to_string()
    }

    fn item_from_row(&self, row: &Row<'_>) -> rusqlite::Result<Authority> {
        Ok(Authority::new(row.get::<_, String>(1)?))
    }
}

/// Reads a left-joined reference from its id and display columns.
pub(crate) fn optional_ref(
    row: &Row<'_>,
    id: usize,
    display: usize,
) -> rusqlite::Result<Option<EntityRef>> {
    let Some(ref_id) = row.get::<_, Option<i64>>(id)? else {
        return Ok(None);
    };
    let display = row.get::<_, Option<String>>(display)?.unwrap_or_default();
    Ok(Some(EntityRef::new(ref_id, display)))
}

/// Reads an inner-joined reference from its id and display columns.
pub(crate) fn required_ref(row: &Row<'_>, id: usize, display: usize) -> rusqlite::Result<EntityRef> {
    Ok(EntityRef::new(row.get(id)?, row.get::<_, String>(display)?))
}

/// Parses a text column through `FromStr`, reporting failures as a
/// conversion error on that column.
pub(crate) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.get::<_, Option<String>>(idx)?
        .map(|raw| {
            raw.parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}
