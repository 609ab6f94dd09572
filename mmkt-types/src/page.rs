//! Page requests, sort orders and the paginated result envelope.
//!
//! A [`PageRequest`] is validated on construction, so holding one means the
//! offset is non-negative and the limit is positive. A [`Page`] carries the
//! metadata computed by the root query; nothing downstream of that query is
//! allowed to change it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction for a single order clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::InvalidSort(format!("unknown direction '{other}'"))),
        }
    }
}

/// One `field direction` clause of a sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    field: String,
    direction: Direction,
}

impl Order {
    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Parses the `field[,asc|desc]` form used by `sort=` query parameters.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim();
        if field.is_empty() {
            return Err(Error::InvalidSort(format!("missing field in '{raw}'")));
        }
        let direction = match parts.next() {
            Some(dir) => dir.parse()?,
            None => Direction::Asc,
        };
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// An ordered list of [`Order`] clauses. Empty means "store default order".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// A sort with a single clause.
    #[must_use]
    pub fn by(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }

    /// Appends a clause, lowest precedence last.
    #[must_use]
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parses every `sort=` value of a request, in order.
    pub fn parse_all<'a>(raw: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let orders = raw
            .into_iter()
            .map(Order::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { orders })
    }
}

/// A validated request for one window of an ordered result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
    sort: Sort,
}

impl PageRequest {
    /// Creates an unsorted request. Fails if `offset < 0` or `limit <= 0`.
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if offset < 0 {
            return Err(Error::InvalidPageRequest(format!(
                "offset must be >= 0, got {offset}"
            )));
        }
        if limit <= 0 {
            return Err(Error::InvalidPageRequest(format!(
                "limit must be > 0, got {limit}"
            )));
        }
        let limit = u32::try_from(limit).map_err(|_| {
            Error::InvalidPageRequest(format!("limit {limit} exceeds {}", u32::MAX))
        })?;
        Ok(Self {
            offset: offset as u64,
            limit,
            sort: Sort::unsorted(),
        })
    }

    /// Creates a request for zero-based page `page` of `size` elements.
    pub fn of_page(page: i64, size: i64) -> Result<Self> {
        if page < 0 {
            return Err(Error::InvalidPageRequest(format!(
                "page must be >= 0, got {page}"
            )));
        }
        let offset = page.checked_mul(size.max(0)).ok_or_else(|| {
            Error::InvalidPageRequest(format!("page {page} of size {size} overflows"))
        })?;
        Self::new(offset, size)
    }

    /// Replaces the sort of this request.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Zero-based page number this request falls on.
    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.offset / self.limit as u64
    }
}

/// Page metadata fixed by the root query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageMeta {
    pub offset: u64,
    pub limit: u32,
    pub total_elements: u64,
}

impl PageMeta {
    /// Total number of pages of `limit` elements.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.limit as u64)
    }

    /// Zero-based page number of this window.
    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.offset / self.limit as u64
    }
}

/// One window of an ordered result plus the metadata of the whole result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    #[serde(flatten)]
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Wraps `content` loaded for `request`.
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            meta: PageMeta {
                offset: request.offset(),
                limit: request.limit(),
                total_elements,
            },
        }
    }

    /// Rebuilds a page from parts produced by [`Page::into_parts`].
    #[must_use]
    pub fn from_parts(content: Vec<T>, meta: PageMeta) -> Self {
        Self { content, meta }
    }

    /// Splits the page into its content and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.content, self.meta)
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        self.meta
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.meta.offset
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.meta.limit
    }

    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.meta.total_elements
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.meta.total_pages()
    }

    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.meta.page_number()
    }

    #[must_use]
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.meta.offset > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.meta.offset + (self.content.len() as u64) < self.meta.total_elements
    }
}
