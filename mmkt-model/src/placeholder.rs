//! Bag element types and the bag descriptors that carry them.

use crate::{
    AppUser, Bag, Dealer, FiscalMonth, FiscalQuarter, FiscalYear, MoneyMarketList, ReportBatch,
    UploadNotification,
};
use serde::{Deserialize, Serialize};

/// A free-form tag that any entity family can carry many of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// A granted role, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Authority {
    pub name: String,
}

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The many-to-many `placeholders` bag, present on every family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholders;

/// The many-to-many `authorities` bag of [`AppUser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Authorities;

macro_rules! placeholder_bag {
    ($($root:ty),+ $(,)?) => {
        $(
            impl Bag<$root> for Placeholders {
                type Item = Placeholder;

                fn name(&self) -> &'static str {
                    "placeholders"
                }

                fn attach(&self, root: &mut $root, items: Vec<Placeholder>) {
                    root.placeholders = items;
                }
            }
        )+
    };
}

placeholder_bag!(
    AppUser,
    Dealer,
    FiscalYear,
    FiscalQuarter,
    FiscalMonth,
    ReportBatch,
    MoneyMarketList,
    UploadNotification,
);

impl Bag<AppUser> for Authorities {
    type Item = Authority;

    fn name(&self) -> &'static str {
        "authorities"
    }

    fn attach(&self, root: &mut AppUser, items: Vec<Authority>) {
        root.authorities = items;
    }
}
