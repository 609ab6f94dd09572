//! SQL text and parameters for root queries.
//!
//! Filters and sort keys only reach root-table columns listed in
//! [`SqlRoot::FIELDS`]; user input never becomes SQL text.

use crate::{ColumnKind, Field, SqlRoot};
use mmkt_loader::{LoadError, LoadResult};
use mmkt_types::{Criteria, FilterValue, PageRequest, Sort};
use rusqlite::types::Value;

/// A statement and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Join-fetch query for the roots matching `criteria`.
///
/// Unwindowed results are ordered by id. Windowed results follow the
/// request's sort with id as the final tie-break, then offset/limit.
pub(crate) fn select_roots<R: SqlRoot>(
    criteria: &Criteria,
    window: Option<&PageRequest>,
) -> LoadResult<Statement> {
    let mut params = Vec::new();
    let mut sql = String::from(R::SELECT);
    sql.push_str(&where_clause::<R>(criteria, &mut params)?);

    match window {
        None => sql.push_str(" ORDER BY e.id"),
        Some(request) => {
            sql.push_str(&order_clause::<R>(request.sort())?);
            let offset = i64::try_from(request.offset()).map_err(|_| {
                LoadError::InvalidPageRequest(format!("offset {} too large", request.offset()))
            })?;
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(Value::Integer(i64::from(request.limit())));
            params.push(Value::Integer(offset));
        }
    }
    Ok(Statement { sql, params })
}

/// Join-fetch query for one root by id.
pub(crate) fn select_root<R: SqlRoot>(id: i64) -> Statement {
    Statement {
        sql: format!("{} WHERE e.id = ?", R::SELECT),
        params: vec![Value::Integer(id)],
    }
}

/// Count of the roots matching `criteria`, over the root table alone.
pub(crate) fn count_roots<R: SqlRoot>(criteria: &Criteria) -> LoadResult<Statement> {
    let mut params = Vec::new();
    let filter = where_clause::<R>(criteria, &mut params)?;
    Ok(Statement {
        sql: format!("SELECT COUNT(*) FROM {} e{filter}", R::TABLE),
        params,
    })
}

/// Root field for a public field name or a bare column name.
pub(crate) fn column<R: SqlRoot>(field: &str) -> Option<&'static Field> {
    R::FIELDS.iter().find(|f| f.matches(field))
}

fn where_clause<R: SqlRoot>(criteria: &Criteria, params: &mut Vec<Value>) -> LoadResult<String> {
    if criteria.is_empty() {
        return Ok(String::new());
    }
    let mut terms = Vec::with_capacity(criteria.len());
    for criterion in criteria.iter() {
        let field = column::<R>(&criterion.field).ok_or_else(|| {
            LoadError::InvalidCriteria(format!(
                "{} has no filterable field '{}'",
                R::TABLE,
                criterion.field
            ))
        })?;
        terms.push(format!("{} = ?", field.column));
        params.push(bind_value(field, &criterion.value)?);
    }
    Ok(format!(" WHERE {}", terms.join(" AND ")))
}

fn order_clause<R: SqlRoot>(sort: &Sort) -> LoadResult<String> {
    let mut keys = Vec::with_capacity(sort.orders().len() + 1);
    let mut has_id = false;
    for order in sort.orders() {
        let column = column::<R>(order.field())
            .ok_or_else(|| {
                LoadError::InvalidPageRequest(format!(
                    "{} has no sortable field '{}'",
                    R::TABLE,
                    order.field()
                ))
            })?
            .column;
        has_id |= column == "e.id";
        keys.push(format!("{column} {}", order.direction().as_sql()));
    }
    if !has_id {
        keys.push("e.id ASC".to_string());
    }
    Ok(format!(" ORDER BY {}", keys.join(", ")))
}

/// Converts a filter value to the storage class of its column.
///
/// Text columns compare as text, so `007` never matches `7`.
fn bind_value(field: &Field, value: &FilterValue) -> LoadResult<Value> {
    let mismatch = || {
        LoadError::InvalidCriteria(format!(
            "'{value}' is not a valid value for {:?} field '{}'",
            field.kind, field.name
        ))
    };
    match (field.kind, value) {
        (ColumnKind::Text, FilterValue::Text(s)) => Ok(Value::Text(s.clone())),
        (ColumnKind::Text, other) => Ok(Value::Text(other.to_string())),
        (ColumnKind::Integer, FilterValue::Int(i)) => Ok(Value::Integer(*i)),
        (ColumnKind::Integer, FilterValue::Text(s)) => {
            s.trim().parse().map(Value::Integer).map_err(|_| mismatch())
        }
        (ColumnKind::Integer, FilterValue::Bool(_)) => Err(mismatch()),
        (ColumnKind::Bool, FilterValue::Bool(b)) => Ok(Value::Integer(i64::from(*b))),
        (ColumnKind::Bool, FilterValue::Int(i @ (0 | 1))) => Ok(Value::Integer(*i)),
        (ColumnKind::Bool, FilterValue::Text(s)) => match s.as_str() {
            "true" | "1" => Ok(Value::Integer(1)),
            "false" | "0" => Ok(Value::Integer(0)),
            _ => Err(mismatch()),
        },
        (ColumnKind::Bool, FilterValue::Int(_)) => Err(mismatch()),
    }
}
