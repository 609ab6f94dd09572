//! Page metadata as response headers: `X-Total-Count` and an RFC 5988 `Link`.

use axum::Json;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri, header};
use axum::response::{IntoResponse, Response};
use mmkt_types::{Page, PageMeta};
use serde::Serialize;

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// The page content as a JSON array, metadata in headers.
pub fn paged_response<T: Serialize>(uri: &Uri, page: Page<T>) -> Response {
    let (content, meta) = page.into_parts();
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(meta.total_elements));
    if let Ok(link) = HeaderValue::from_str(&link_header(uri.path(), uri.query(), &meta)) {
        headers.insert(header::LINK, link);
    }
    (headers, Json(content)).into_response()
}

/// `next`, `prev`, `last` and `first` links for `meta`, keeping every query
/// parameter except `page` and `size`.
pub fn link_header(path: &str, query: Option<&str>, meta: &PageMeta) -> String {
    let kept: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            key != "page" && key != "size"
        })
        .collect();

    let page = meta.page_number();
    let last = meta.total_pages().saturating_sub(1);
    let link = |number: u64, rel: &str| {
        let mut query = kept.join("&");
        if !query.is_empty() {
            query.push('&');
        }
        format!("<{path}?{query}page={number}&size={}>; rel=\"{rel}\"", meta.limit)
    };

    let mut links = Vec::with_capacity(4);
    if page < last {
        links.push(link(page + 1, "next"));
    }
    if page > 0 {
        links.push(link(page - 1, "prev"));
    }
    links.push(link(last, "last"));
    links.push(link(0, "first"));
    links.join(",")
}
