//! In-memory executor for loader tests.
//!
//! Counts queries per stage and returns bag rows in reverse storage order so
//! tests never depend on row order.

#![allow(dead_code)]

use mmkt_loader::{BagExecutor, LoadError, LoadResult, RootExecutor};
use mmkt_model::{Bag, BagRow, Root};
use mmkt_types::{Criteria, Direction, FilterValue, PageRequest};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub id: u32,
    pub counterparty: String,
    pub tags: Vec<String>,
    pub legs: Vec<u32>,
}

impl Root for Deal {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }
}

pub struct Tags;

impl Bag<Deal> for Tags {
    type Item = String;

    fn name(&self) -> &'static str {
        "tags"
    }

    fn attach(&self, root: &mut Deal, items: Vec<String>) {
        root.tags = items;
    }
}

pub struct Legs;

impl Bag<Deal> for Legs {
    type Item = u32;

    fn name(&self) -> &'static str {
        "legs"
    }

    fn attach(&self, root: &mut Deal, items: Vec<u32>) {
        root.legs = items;
    }
}

pub fn deal(id: u32, counterparty: &str) -> Deal {
    Deal {
        id,
        counterparty: counterparty.to_string(),
        tags: Vec::new(),
        legs: Vec::new(),
    }
}

pub fn ids(deals: &[Deal]) -> Vec<u32> {
    deals.iter().map(|d| d.id).collect()
}

#[derive(Default)]
pub struct MemoryExecutor {
    /// Roots in storage order (not id order).
    pub deals: Vec<Deal>,
    pub tag_rows: Vec<(u32, String)>,
    pub leg_rows: Vec<(u32, u32)>,
    /// Returned by every tag query regardless of the requested ids.
    pub stray_tag_rows: Vec<(u32, String)>,
    pub fail_roots: bool,
    pub fail_bags: bool,
    pub root_queries: Cell<usize>,
    pub count_queries: Cell<usize>,
    pub bag_queries: Cell<usize>,
    pub last_bag_ids: RefCell<Vec<u32>>,
}

impl MemoryExecutor {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self {
            deals,
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, rows: &[(u32, &str)]) -> Self {
        self.tag_rows = rows.iter().map(|(id, t)| (*id, t.to_string())).collect();
        self
    }

    pub fn with_legs(mut self, rows: &[(u32, u32)]) -> Self {
        self.leg_rows = rows.to_vec();
        self
    }

    /// (root, count, bag) query counts.
    pub fn queries(&self) -> (usize, usize, usize) {
        (
            self.root_queries.get(),
            self.count_queries.get(),
            self.bag_queries.get(),
        )
    }

    fn matching(&self, criteria: &Criteria) -> LoadResult<Vec<Deal>> {
        let mut out = Vec::new();
        'deals: for deal in &self.deals {
            for criterion in criteria.iter() {
                let matches = match (criterion.field.as_str(), &criterion.value) {
                    ("counterparty", FilterValue::Text(v)) => deal.counterparty == *v,
                    ("id", FilterValue::Int(v)) => i64::from(deal.id) == *v,
                    (field, _) => {
                        return Err(LoadError::InvalidCriteria(format!(
                            "unknown filter field '{field}'"
                        )));
                    }
                };
                if !matches {
                    continue 'deals;
                }
            }
            out.push(deal.clone());
        }
        Ok(out)
    }

    fn unavailable(&self) -> LoadError {
        LoadError::StorageUnavailable("connection refused".into())
    }
}

impl RootExecutor<Deal> for MemoryExecutor {
    fn fetch_roots(
        &self,
        criteria: &Criteria,
        window: Option<&PageRequest>,
    ) -> LoadResult<Vec<Deal>> {
        self.root_queries.set(self.root_queries.get() + 1);
        if self.fail_roots {
            return Err(self.unavailable());
        }
        let mut deals = self.matching(criteria)?;
        let Some(request) = window else {
            deals.sort_by_key(|d| d.id);
            return Ok(deals);
        };
        for order in request.sort().orders() {
            if !matches!(order.field(), "id" | "counterparty") {
                return Err(LoadError::InvalidPageRequest(format!(
                    "unknown sort field '{}'",
                    order.field()
                )));
            }
        }
        deals.sort_by(|a, b| {
            let mut ord = Ordering::Equal;
            for order in request.sort().orders() {
                let cmp = match order.field() {
                    "counterparty" => a.counterparty.cmp(&b.counterparty),
                    _ => a.id.cmp(&b.id),
                };
                let cmp = match order.direction() {
                    Direction::Asc => cmp,
                    Direction::Desc => cmp.reverse(),
                };
                ord = ord.then(cmp);
            }
            ord.then(a.id.cmp(&b.id))
        });
        Ok(deals
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect())
    }

    fn fetch_root(&self, id: &u32) -> LoadResult<Option<Deal>> {
        self.root_queries.set(self.root_queries.get() + 1);
        if self.fail_roots {
            return Err(self.unavailable());
        }
        Ok(self.deals.iter().find(|d| d.id == *id).cloned())
    }

    fn count_roots(&self, criteria: &Criteria) -> LoadResult<u64> {
        self.count_queries.set(self.count_queries.get() + 1);
        if self.fail_roots {
            return Err(self.unavailable());
        }
        Ok(self.matching(criteria)?.len() as u64)
    }
}

impl BagExecutor<Deal, Tags> for MemoryExecutor {
    fn fetch_bag(&self, _bag: &Tags, ids: &[u32]) -> LoadResult<Vec<BagRow<u32, String>>> {
        self.bag_queries.set(self.bag_queries.get() + 1);
        *self.last_bag_ids.borrow_mut() = ids.to_vec();
        if self.fail_bags {
            return Err(self.unavailable());
        }
        let mut rows: Vec<_> = self
            .tag_rows
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .chain(self.stray_tag_rows.iter())
            .map(|(id, tag)| BagRow::new(*id, tag.clone()))
            .collect();
        rows.reverse();
        Ok(rows)
    }
}

impl BagExecutor<Deal, Legs> for MemoryExecutor {
    fn fetch_bag(&self, _bag: &Legs, ids: &[u32]) -> LoadResult<Vec<BagRow<u32, u32>>> {
        self.bag_queries.set(self.bag_queries.get() + 1);
        *self.last_bag_ids.borrow_mut() = ids.to_vec();
        if self.fail_bags {
            return Err(self.unavailable());
        }
        let mut rows: Vec<_> = self
            .leg_rows
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, leg)| BagRow::new(*id, *leg))
            .collect();
        rows.reverse();
        Ok(rows)
    }
}
