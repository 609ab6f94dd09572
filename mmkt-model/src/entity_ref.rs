use serde::{Deserialize, Serialize};

/// A to-one reference populated by the root query's join.
///
/// Carries the target's id and its display column (code, login, name) so
/// callers never need a follow-up query to render the relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub display: String,
}

impl EntityRef {
    pub fn new(id: i64, display: impl Into<String>) -> Self {
        Self {
            id,
            display: display.into(),
        }
    }
}
