use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

pub mod admin_catalog_handlers;
pub mod catalog_handlers;
pub mod join_handlers;
pub mod media_handlers;
pub mod order_handlers;
pub mod phone_handlers;
pub mod user_handlers;

/// Cache-busting headers for endpoints that must always serve fresh data
/// (the polling feed in particular sits behind an edge cache in production).
pub fn no_store_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(
        HeaderName::from_static("surrogate-control"),
        HeaderValue::from_static("no-store"),
    );
    headers
}
