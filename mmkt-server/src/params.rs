//! Query-string parsing for list endpoints.
//!
//! Recognised parameters:
//! - `page`, `size`: zero-based page number and page size
//! - `sort=field[,asc|desc]`: repeatable, earlier clauses take precedence
//! - `<field>.equals=<value>`: repeatable equality filters, passed on as text
//! - `bag=<name>`: which bag to populate
//!
//! Any of `page`, `size` or `sort` makes the response paged.

use mmkt_loader::LoadError;
use mmkt_types::{Criteria, PageRequest, Sort};

/// Page size used when only `page` or `sort` is given.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A parsed list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub criteria: Criteria,
    pub page: Option<PageRequest>,
    pub bag: Option<String>,
}

impl ListQuery {
    /// Parses decoded query pairs in request order.
    pub fn parse(pairs: &[(String, String)]) -> Result<Self, LoadError> {
        let mut criteria = Criteria::none();
        let mut page = None;
        let mut size = None;
        let mut sorts = Vec::new();
        let mut bag = None;

        for (key, value) in pairs {
            match key.as_str() {
                "page" => page = Some(parse_number("page", value)?),
                "size" => size = Some(parse_number("size", value)?),
                "sort" => sorts.push(value.as_str()),
                "bag" => bag = Some(value.clone()),
                _ => {
                    if let Some((field, operator)) = key.rsplit_once('.') {
                        if operator != "equals" {
                            return Err(LoadError::InvalidCriteria(format!(
                                "unsupported filter operator '{operator}' on '{field}'"
                            )));
                        }
                        criteria = criteria.eq(field, value.as_str());
                    }
                }
            }
        }

        let page = if page.is_some() || size.is_some() || !sorts.is_empty() {
            let sort = Sort::parse_all(sorts)?;
            let request = PageRequest::of_page(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))?;
            Some(request.with_sort(sort))
        } else {
            None
        };

        Ok(Self {
            criteria,
            page,
            bag,
        })
    }
}

fn parse_number(name: &str, raw: &str) -> Result<i64, LoadError> {
    raw.trim()
        .parse()
        .map_err(|_| LoadError::InvalidPageRequest(format!("{name} must be an integer, got '{raw}'")))
}
