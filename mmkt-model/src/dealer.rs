use crate::{EntityRef, Placeholder, Root};
use serde::{Deserialize, Serialize};

/// A counterparty dealer. Dealers may be grouped under a parent dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: i64,
    pub dealer_name: String,
    pub tax_number: Option<String>,
    pub bank_name: Option<String>,
    pub parent_dealer: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for Dealer {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
