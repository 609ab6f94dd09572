use crate::{Authority, EntityRef, Placeholder, Root};
use serde::{Deserialize, Serialize};

/// An application user, optionally attached to the dealer they act for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: i64,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub activated: bool,
    pub dealer: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    #[serde(default)]
    pub authorities: Vec<Authority>,
}

impl Root for AppUser {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
