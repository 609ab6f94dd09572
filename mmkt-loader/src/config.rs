//! Loader configuration.

use crate::{LoadError, LoadResult};
use mmkt_types::PageRequest;
use serde::{Deserialize, Serialize};

/// What to do with a bag row whose root id was not loaded.
///
/// Correct bag queries never produce such rows, so this only decides how
/// loudly a broken query is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Log a warning and drop the row.
    #[default]
    Drop,
    /// Abort the load with [`LoadError::ReconciliationMismatch`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Largest page limit accepted by paged loads.
    pub max_page_size: u32,
    pub mismatch_policy: MismatchPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_page_size: 2000,
            mismatch_policy: MismatchPolicy::Drop,
        }
    }
}

impl LoaderConfig {
    /// Rejects requests above `max_page_size`.
    pub fn check_page(&self, request: &PageRequest) -> LoadResult<()> {
        if request.limit() > self.max_page_size {
            return Err(LoadError::InvalidPageRequest(format!(
                "limit {} exceeds maximum page size {}",
                request.limit(),
                self.max_page_size
            )));
        }
        Ok(())
    }
}
