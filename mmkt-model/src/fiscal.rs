//! Fiscal calendar families: years, quarters and months.

use crate::{EntityRef, Placeholder, Root};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FiscalYearStatus {
    Open,
    Closed,
    InProgress,
}

impl FiscalYearStatus {
    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::InProgress => "IN_PROGRESS",
        }
    }
}

impl fmt::Display for FiscalYearStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown fiscal year status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fiscal year status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for FiscalYearStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "IN_PROGRESS" => Ok(Self::InProgress),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYear {
    pub id: i64,
    pub fiscal_year_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub fiscal_year_status: Option<FiscalYearStatus>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for FiscalYear {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// A quarter always belongs to exactly one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalQuarter {
    pub id: i64,
    pub quarter_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub fiscal_quarter_code: String,
    pub fiscal_year: EntityRef,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for FiscalQuarter {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// A month belongs to a fiscal year and, once quarters are set up, to a
/// quarter of that year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalMonth {
    pub id: i64,
    pub month_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub fiscal_month_code: String,
    pub fiscal_year: EntityRef,
    pub fiscal_quarter: Option<EntityRef>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl Root for FiscalMonth {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
