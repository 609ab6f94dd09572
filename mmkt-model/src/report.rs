//! Upload-side families: report batches, the money-market lists parsed
//! from them, and the notifications raised while processing an upload.

use crate::{EntityRef, Placeholder, Root};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One uploaded report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBatch {
    pub id: i64,
    pub report_date: NaiveDate,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for ReportBatch {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// The money-market deal list extracted from a report batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyMarketList {
    pub id: i64,
    pub report_date: NaiveDate,
    pub uploaded_on: NaiveDateTime,
    pub description: Option<String>,
    pub active: bool,
    pub report_batch: Option<EntityRef>,
    pub uploaded_by: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for MoneyMarketList {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadNotification {
    pub id: i64,
    pub message: String,
    pub notified_on: NaiveDateTime,
    pub report_batch: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for UploadNotification {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
