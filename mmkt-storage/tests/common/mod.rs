#![allow(dead_code)]

use mmkt_storage::SqliteStore;

/// A small book: five users, two dealers, a fiscal year with quarters and
/// months, and two report batches with their lists and notifications.
pub const FIXTURE: &str = "
    INSERT INTO placeholder (id, description, token) VALUES
        (1, 'Urgent', NULL),
        (2, 'Audited', 'tok-2'),
        (3, 'Legacy', NULL);

    INSERT INTO authority (name) VALUES ('ROLE_ADMIN'), ('ROLE_USER');

    INSERT INTO dealer (id, dealer_name, tax_number, bank_name, parent_dealer_id) VALUES
        (1, 'Alpha Capital', 'P051', 'KCB', NULL),
        (2, 'Beta Securities', NULL, 'NCBA', 1);

    INSERT INTO app_user (id, login, first_name, last_name, email, activated, dealer_id) VALUES
        (1, 'admin', 'Ada', 'Admin', 'admin@example.com', 1, 1),
        (2, 'user', 'Uma', 'User', NULL, 1, NULL),
        (3, 'trader', 'Tom', 'Trader', 'tom@example.com', 0, 2),
        (4, 'auditor', 'Aud', 'Itor', NULL, 1, 1),
        (5, 'clerk', NULL, NULL, NULL, 0, NULL);

    INSERT INTO app_user_authority (app_user_id, authority_name) VALUES
        (1, 'ROLE_ADMIN'), (1, 'ROLE_USER'), (2, 'ROLE_USER'), (3, 'ROLE_USER'), (4, 'ROLE_USER');

    INSERT INTO app_user_placeholder (app_user_id, placeholder_id) VALUES (1, 1), (1, 2), (3, 3);
    INSERT INTO dealer_placeholder (dealer_id, placeholder_id) VALUES (2, 1);

    INSERT INTO fiscal_year (id, fiscal_year_code, start_date, end_date, fiscal_year_status) VALUES
        (1, 'FY2023', '2023-01-01', '2023-12-31', 'CLOSED'),
        (2, 'FY2024', '2024-01-01', '2024-12-31', 'OPEN');
    INSERT INTO fiscal_year_placeholder (fiscal_year_id, placeholder_id) VALUES (2, 1), (2, 2);

    INSERT INTO fiscal_quarter (id, quarter_number, start_date, end_date, fiscal_quarter_code, fiscal_year_id) VALUES
        (1, 1, '2024-01-01', '2024-03-31', 'FY2024-Q1', 2),
        (2, 2, '2024-04-01', '2024-06-30', 'FY2024-Q2', 2);

    INSERT INTO fiscal_month (id, month_number, start_date, end_date, fiscal_month_code, fiscal_year_id, fiscal_quarter_id) VALUES
        (1, 1, '2024-01-01', '2024-01-31', 'FY2024-M01', 2, 1),
        (2, 4, '2024-04-01', '2024-04-30', 'FY2024-M04', 2, NULL);

    INSERT INTO report_batch (id, report_date, description, file_name, uploaded_by_id) VALUES
        (1, '2024-03-29', 'Q1 close', 'mm-2024-03-29.csv', 1),
        (2, '2024-04-05', NULL, NULL, NULL);

    INSERT INTO money_market_list (id, report_date, uploaded_on, description, active, report_batch_id, uploaded_by_id) VALUES
        (1, '2024-03-29', '2024-03-29 17:45:00', 'Q1 list', 1, 1, 1),
        (2, '2024-04-05', '2024-04-05T09:00:00', NULL, 0, 2, NULL);
    INSERT INTO money_market_list_placeholder (money_market_list_id, placeholder_id) VALUES (1, 3);

    INSERT INTO upload_notification (id, message, notified_on, report_batch_id) VALUES
        (1, 'Uploaded', '2024-03-29 17:46:00', 1),
        (2, 'Orphaned', '2024-04-06 08:00:00', NULL);
";

/// An in-memory store loaded with [`FIXTURE`].
pub fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.execute_batch(FIXTURE).unwrap();
    store
}

pub fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}
