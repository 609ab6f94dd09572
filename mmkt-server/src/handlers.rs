//! Route handlers.
//!
//! Loads run on the blocking pool; the store serializes them on its
//! connection.

use crate::pagination::paged_response;
use crate::params::ListQuery;
use crate::{ApiError, AppState};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use mmkt_loader::{LoadResult, RelationLoader};
use mmkt_model::{AppUser, Authorities, Placeholders};
use mmkt_storage::{SqlBag, SqlRoot};
use mmkt_types::Page;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Result of a list load: the whole list or one page of it.
enum Listing<R> {
    All(Vec<R>),
    Page(Page<R>),
}

impl<R: Serialize> Listing<R> {
    fn respond(self, uri: &Uri) -> Response {
        match self {
            Self::All(roots) => Json(roots).into_response(),
            Self::Page(page) => paged_response(uri, page),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BagParam {
    bag: Option<String>,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "maxPageSize": state.config.max_page_size,
    }))
}

/// `GET /api/<family>`: every root, or one page of them, with placeholders.
pub(crate) async fn list<R>(
    State(state): State<AppState>,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError>
where
    R: SqlRoot + Serialize + Send + 'static,
    Placeholders: SqlBag<R>,
{
    let query = ListQuery::parse(&pairs)?;
    placeholders_only(query.bag.as_deref())?;
    let listing = load_listing::<R, _>(state, Placeholders, query).await?;
    Ok(listing.respond(&uri))
}

/// `GET /api/<family>/{id}` with placeholders.
pub(crate) async fn get_one<R>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(param): Query<BagParam>,
) -> Result<Json<R>, ApiError>
where
    R: SqlRoot + Serialize + Send + 'static,
    Placeholders: SqlBag<R>,
{
    placeholders_only(param.bag.as_deref())?;
    let root = load_one::<R, _>(state, Placeholders, id).await?;
    root.map(Json).ok_or(ApiError::NotFound {
        resource: R::TABLE,
        id,
    })
}

/// `GET /api/app-users`, with either bag.
pub(crate) async fn list_users(
    State(state): State<AppState>,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let query = ListQuery::parse(&pairs)?;
    let listing = match UserBag::parse(query.bag.as_deref())? {
        UserBag::Placeholders => load_listing::<AppUser, _>(state, Placeholders, query).await?,
        UserBag::Authorities => load_listing::<AppUser, _>(state, Authorities, query).await?,
    };
    Ok(listing.respond(&uri))
}

/// `GET /api/app-users/{id}`, with either bag.
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(param): Query<BagParam>,
) -> Result<Json<AppUser>, ApiError> {
    let user = match UserBag::parse(param.bag.as_deref())? {
        UserBag::Placeholders => load_one::<AppUser, _>(state, Placeholders, id).await?,
        UserBag::Authorities => load_one::<AppUser, _>(state, Authorities, id).await?,
    };
    user.map(Json).ok_or(ApiError::NotFound {
        resource: AppUser::TABLE,
        id,
    })
}

enum UserBag {
    Placeholders,
    Authorities,
}

impl UserBag {
    fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw {
            None | Some("placeholders") => Ok(Self::Placeholders),
            Some("authorities") => Ok(Self::Authorities),
            Some(other) => Err(ApiError::UnknownBag(other.to_string())),
        }
    }
}

fn placeholders_only(raw: Option<&str>) -> Result<(), ApiError> {
    match raw {
        None | Some("placeholders") => Ok(()),
        Some(other) => Err(ApiError::UnknownBag(other.to_string())),
    }
}

async fn load_listing<R, B>(
    state: AppState,
    bag: B,
    query: ListQuery,
) -> Result<Listing<R>, ApiError>
where
    R: SqlRoot + Send + 'static,
    B: SqlBag<R> + Send + 'static,
{
    blocking(move || {
        let loader = RelationLoader::with_config(&state.store, state.config.clone());
        match &query.page {
            Some(request) => loader
                .load_page_matching_with_bag::<R, B>(&query.criteria, &bag, request)
                .map(Listing::Page),
            None => loader
                .load_all_matching_with_bag::<R, B>(&query.criteria, &bag)
                .map(Listing::All),
        }
    })
    .await
}

async fn load_one<R, B>(state: AppState, bag: B, id: i64) -> Result<Option<R>, ApiError>
where
    R: SqlRoot + Send + 'static,
    B: SqlBag<R> + Send + 'static,
{
    blocking(move || {
        RelationLoader::with_config(&state.store, state.config.clone())
            .load_one_with_bag::<R, B>(&id, &bag)
    })
    .await
}

async fn blocking<T, F>(load: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> LoadResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(load)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(result?)
}
