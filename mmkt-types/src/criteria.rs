//! Equality filters applied to root queries.
//!
//! Criteria name fields by their public (camelCase or snake_case) name; the
//! store decides which fields are filterable and rejects the rest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal compared against a root column.
///
/// The store converts it to the column's storage class, so query-string
/// input arrives as [`FilterValue::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// `field = value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub field: String,
    pub value: FilterValue,
}

/// A conjunction of [`Criterion`]s. Empty matches every root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    /// Criteria matching every root.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds `field = value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.criteria.push(Criterion {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }
}
