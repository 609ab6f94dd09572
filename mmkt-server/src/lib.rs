//! Read-only HTTP API over the money-market deal store.
//!
//! Every entity family gets a list route and a single-root route. List
//! responses are ordered by id unless paged; paged responses carry their
//! metadata in `X-Total-Count` and `Link` headers.

mod error;
mod handlers;
mod pagination;
mod params;

pub use error::{ApiError, ErrorBody};
pub use pagination::{X_TOTAL_COUNT, link_header, paged_response};
pub use params::{DEFAULT_PAGE_SIZE, ListQuery};

use axum::{Router, routing::get};
use handlers::{get_one, get_user, health, list, list_users};
use mmkt_loader::LoaderConfig;
use mmkt_model::{
    Dealer, FiscalMonth, FiscalQuarter, FiscalYear, MoneyMarketList, Placeholders, ReportBatch,
    UploadNotification,
};
use mmkt_storage::{SqlBag, SqlRoot, SqliteStore};
use serde::Serialize;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub config: LoaderConfig,
}

impl AppState {
    pub fn new(store: SqliteStore, config: LoaderConfig) -> Self {
        Self { store, config }
    }
}

/// Build the HTTP API router over `state`.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/app-users", get(list_users))
        .route("/api/app-users/{id}", get(get_user));

    let router = family::<Dealer>(router, "/api/dealers");
    let router = family::<FiscalYear>(router, "/api/fiscal-years");
    let router = family::<FiscalQuarter>(router, "/api/fiscal-quarters");
    let router = family::<FiscalMonth>(router, "/api/fiscal-months");
    let router = family::<ReportBatch>(router, "/api/report-batches");
    let router = family::<MoneyMarketList>(router, "/api/money-market-lists");
    let router = family::<UploadNotification>(router, "/api/upload-notifications");

    router.with_state(state)
}

fn family<R>(router: Router<AppState>, path: &str) -> Router<AppState>
where
    R: SqlRoot + Serialize + Send + 'static,
    Placeholders: SqlBag<R>,
{
    router
        .route(path, get(list::<R>))
        .route(&format!("{path}/{{id}}"), get(get_one::<R>))
}
