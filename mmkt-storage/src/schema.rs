//! Versioned schema migrations.
//!
//! The applied version lives in `PRAGMA user_version`. Migrations run in
//! order on open, each in its own transaction, and are never edited once
//! released; schema changes append a new entry.

use crate::{StorageError, StorageResult};
use rusqlite::Connection;
use tracing::info;

const MIGRATIONS: &[&str] = &[
    // 1: users, dealers and the shared bag element tables.
    "
    CREATE TABLE placeholder (
        id INTEGER PRIMARY KEY,
        description TEXT NOT NULL,
        token TEXT
    );

    CREATE TABLE authority (
        name TEXT PRIMARY KEY
    );

    CREATE TABLE dealer (
        id INTEGER PRIMARY KEY,
        dealer_name TEXT NOT NULL,
        tax_number TEXT,
        bank_name TEXT,
        parent_dealer_id INTEGER REFERENCES dealer(id)
    );

    CREATE TABLE dealer_placeholder (
        dealer_id INTEGER NOT NULL REFERENCES dealer(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (dealer_id, placeholder_id)
    );

    CREATE TABLE app_user (
        id INTEGER PRIMARY KEY,
        login TEXT NOT NULL UNIQUE,
        first_name TEXT,
        last_name TEXT,
        email TEXT,
        activated INTEGER NOT NULL DEFAULT 0,
        dealer_id INTEGER REFERENCES dealer(id)
    );

    CREATE TABLE app_user_placeholder (
        app_user_id INTEGER NOT NULL REFERENCES app_user(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (app_user_id, placeholder_id)
    );

    CREATE TABLE app_user_authority (
        app_user_id INTEGER NOT NULL REFERENCES app_user(id),
        authority_name TEXT NOT NULL REFERENCES authority(name),
        PRIMARY KEY (app_user_id, authority_name)
    );
    ",
    // 2: fiscal calendar.
    "
    CREATE TABLE fiscal_year (
        id INTEGER PRIMARY KEY,
        fiscal_year_code TEXT NOT NULL UNIQUE,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        fiscal_year_status TEXT
    );

    CREATE TABLE fiscal_year_placeholder (
        fiscal_year_id INTEGER NOT NULL REFERENCES fiscal_year(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (fiscal_year_id, placeholder_id)
    );

    CREATE TABLE fiscal_quarter (
        id INTEGER PRIMARY KEY,
        quarter_number INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        fiscal_quarter_code TEXT NOT NULL UNIQUE,
        fiscal_year_id INTEGER NOT NULL REFERENCES fiscal_year(id)
    );

    CREATE TABLE fiscal_quarter_placeholder (
        fiscal_quarter_id INTEGER NOT NULL REFERENCES fiscal_quarter(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (fiscal_quarter_id, placeholder_id)
    );

    CREATE TABLE fiscal_month (
        id INTEGER PRIMARY KEY,
        month_number INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        fiscal_month_code TEXT NOT NULL UNIQUE,
        fiscal_year_id INTEGER NOT NULL REFERENCES fiscal_year(id),
        fiscal_quarter_id INTEGER REFERENCES fiscal_quarter(id)
    );

    CREATE TABLE fiscal_month_placeholder (
        fiscal_month_id INTEGER NOT NULL REFERENCES fiscal_month(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (fiscal_month_id, placeholder_id)
    );
    ",
    // 3: report uploads.
    "
    CREATE TABLE report_batch (
        id INTEGER PRIMARY KEY,
        report_date TEXT NOT NULL,
        description TEXT,
        file_name TEXT,
        uploaded_by_id INTEGER REFERENCES app_user(id)
    );

    CREATE TABLE report_batch_placeholder (
        report_batch_id INTEGER NOT NULL REFERENCES report_batch(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (report_batch_id, placeholder_id)
    );

    CREATE TABLE money_market_list (
        id INTEGER PRIMARY KEY,
        report_date TEXT NOT NULL,
        uploaded_on TEXT NOT NULL,
        description TEXT,
        active INTEGER NOT NULL DEFAULT 1,
        report_batch_id INTEGER REFERENCES report_batch(id),
        uploaded_by_id INTEGER REFERENCES app_user(id)
    );

    CREATE TABLE money_market_list_placeholder (
        money_market_list_id INTEGER NOT NULL REFERENCES money_market_list(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (money_market_list_id, placeholder_id)
    );

    CREATE TABLE upload_notification (
        id INTEGER PRIMARY KEY,
        message TEXT NOT NULL,
        notified_on TEXT NOT NULL,
        report_batch_id INTEGER REFERENCES report_batch(id)
    );

    CREATE TABLE upload_notification_placeholder (
        upload_notification_id INTEGER NOT NULL REFERENCES upload_notification(id),
        placeholder_id INTEGER NOT NULL REFERENCES placeholder(id),
        PRIMARY KEY (upload_notification_id, placeholder_id)
    );
    ",
];

/// Schema version after every migration has been applied.
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Brings `conn` up to [`SCHEMA_VERSION`]. Returns the number of migrations
/// applied.
pub(crate) fn migrate(conn: &Connection) -> StorageResult<u32> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if current > SCHEMA_VERSION {
        return Err(StorageError::Migration(format!(
            "database schema version {current} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    let mut applied = 0;
    for (version, sql) in (1u32..).zip(MIGRATIONS.iter()).skip(current as usize) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| StorageError::Migration(format!("migration {version} failed: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(version, "Applied schema migration");
        applied += 1;
    }
    Ok(applied)
}
