//! [`SqlRoot`] mappings for every entity family.
//!
//! Column positions in `from_row` follow the `SELECT` list of the same impl.

use crate::mapping::{optional_ref, parse_column, required_ref};
use crate::{Field, SqlRoot};
use mmkt_model::{
    AppUser, Dealer, FiscalMonth, FiscalQuarter, FiscalYear, FiscalYearStatus, MoneyMarketList,
    ReportBatch, UploadNotification,
};
use rusqlite::Row;

impl SqlRoot for AppUser {
    const TABLE: &'static str = "app_user";

    const SELECT: &'static str = "SELECT e.id, e.login, e.first_name, e.last_name, e.email, \
         e.activated, d.id, d.dealer_name \
         FROM app_user e \
         LEFT JOIN dealer d ON d.id = e.dealer_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("login", "e.login"),
        Field::text("firstName", "e.first_name"),
        Field::text("lastName", "e.last_name"),
        Field::text("email", "e.email"),
        Field::bool("activated", "e.activated"),
        Field::integer("dealerId", "e.dealer_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            login: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            email: row.get(4)?,
            activated: row.get(5)?,
            dealer: optional_ref(row, 6, 7)?,
            placeholders: Vec::new(),
            authorities: Vec::new(),
        })
    }
}

impl SqlRoot for Dealer {
    const TABLE: &'static str = "dealer";

    const SELECT: &'static str = "SELECT e.id, e.dealer_name, e.tax_number, e.bank_name, \
         p.id, p.dealer_name \
         FROM dealer e \
         LEFT JOIN dealer p ON p.id = e.parent_dealer_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("dealerName", "e.dealer_name"),
        Field::text("taxNumber", "e.tax_number"),
        Field::text("bankName", "e.bank_name"),
        Field::integer("parentDealerId", "e.parent_dealer_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            dealer_name: row.get(1)?,
            tax_number: row.get(2)?,
            bank_name: row.get(3)?,
            parent_dealer: optional_ref(row, 4, 5)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for FiscalYear {
    const TABLE: &'static str = "fiscal_year";

    const SELECT: &'static str = "SELECT e.id, e.fiscal_year_code, e.start_date, e.end_date, \
         e.fiscal_year_status \
         FROM fiscal_year e";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("fiscalYearCode", "e.fiscal_year_code"),
        Field::text("startDate", "e.start_date"),
        Field::text("endDate", "e.end_date"),
        Field::text("fiscalYearStatus", "e.fiscal_year_status"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fiscal_year_code: row.get(1)?,
            start_date: row.get(2)?,
            end_date: row.get(3)?,
            fiscal_year_status: parse_column::<FiscalYearStatus>(row, 4)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for FiscalQuarter {
    const TABLE: &'static str = "fiscal_quarter";

    const SELECT: &'static str = "SELECT e.id, e.quarter_number, e.start_date, e.end_date, \
         e.fiscal_quarter_code, fy.id, fy.fiscal_year_code \
         FROM fiscal_quarter e \
         JOIN fiscal_year fy ON fy.id = e.fiscal_year_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::integer("quarterNumber", "e.quarter_number"),
        Field::text("startDate", "e.start_date"),
        Field::text("endDate", "e.end_date"),
        Field::text("fiscalQuarterCode", "e.fiscal_quarter_code"),
        Field::integer("fiscalYearId", "e.fiscal_year_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            quarter_number: row.get(1)?,
            start_date: row.get(2)?,
            end_date: row.get(3)?,
            fiscal_quarter_code: row.get(4)?,
            fiscal_year: required_ref(row, 5, 6)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for FiscalMonth {
    const TABLE: &'static str = "fiscal_month";

    const SELECT: &'static str = "SELECT e.id, e.month_number, e.start_date, e.end_date, \
         e.fiscal_month_code, fy.id, fy.fiscal_year_code, fq.id, fq.fiscal_quarter_code \
         FROM fiscal_month e \
         JOIN fiscal_year fy ON fy.id = e.fiscal_year_id \
         LEFT JOIN fiscal_quarter fq ON fq.id = e.fiscal_quarter_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::integer("monthNumber", "e.month_number"),
        Field::text("startDate", "e.start_date"),
        Field::text("endDate", "e.end_date"),
        Field::text("fiscalMonthCode", "e.fiscal_month_code"),
        Field::integer("fiscalYearId", "e.fiscal_year_id"),
        Field::integer("fiscalQuarterId", "e.fiscal_quarter_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            month_number: row.get(1)?,
            start_date: row.get(2)?,
            end_date: row.get(3)?,
            fiscal_month_code: row.get(4)?,
            fiscal_year: required_ref(row, 5, 6)?,
            fiscal_quarter: optional_ref(row, 7, 8)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for ReportBatch {
    const TABLE: &'static str = "report_batch";

    const SELECT: &'static str = "SELECT e.id, e.report_date, e.description, e.file_name, \
         u.id, u.login \
         FROM report_batch e \
         LEFT JOIN app_user u ON u.id = e.uploaded_by_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("reportDate", "e.report_date"),
        Field::text("description", "e.description"),
        Field::text("fileName", "e.file_name"),
        Field::integer("uploadedById", "e.uploaded_by_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            report_date: row.get(1)?,
            description: row.get(2)?,
            file_name: row.get(3)?,
            uploaded_by: optional_ref(row, 4, 5)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for MoneyMarketList {
    const TABLE: &'static str = "money_market_list";

    const SELECT: &'static str = "SELECT e.id, e.report_date, e.uploaded_on, e.description, \
         e.active, rb.id, COALESCE(rb.file_name, rb.report_date), u.id, u.login \
         FROM money_market_list e \
         LEFT JOIN report_batch rb ON rb.id = e.report_batch_id \
         LEFT JOIN app_user u ON u.id = e.uploaded_by_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("reportDate", "e.report_date"),
        Field::text("uploadedOn", "e.uploaded_on"),
        Field::text("description", "e.description"),
        Field::bool("active", "e.active"),
        Field::integer("reportBatchId", "e.report_batch_id"),
        Field::integer("uploadedById", "e.uploaded_by_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            report_date: row.get(1)?,
            uploaded_on: row.get(2)?,
            description: row.get(3)?,
            active: row.get(4)?,
            report_batch: optional_ref(row, 5, 6)?,
            uploaded_by: optional_ref(row, 7, 8)?,
            placeholders: Vec::new(),
        })
    }
}

impl SqlRoot for UploadNotification {
    const TABLE: &'static str = "upload_notification";

    const SELECT: &'static str = "SELECT e.id, e.message, e.notified_on, \
         rb.id, COALESCE(rb.file_name, rb.report_date) \
         FROM upload_notification e \
         LEFT JOIN report_batch rb ON rb.id = e.report_batch_id";

    const FIELDS: &'static [Field] = &[
        Field::integer("id", "e.id"),
        Field::text("message", "e.message"),
        Field::text("notifiedOn", "e.notified_on"),
        Field::integer("reportBatchId", "e.report_batch_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            message: row.get(1)?,
            notified_on: row.get(2)?,
            report_batch: optional_ref(row, 3, 4)?,
            placeholders: Vec::new(),
        })
    }
}
