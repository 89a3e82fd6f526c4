use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, HeaderValue};

/// How long intermediate caches may reuse a rendered member page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age: u32,
}

impl CachePolicy {
    pub fn new(max_age: u32) -> Self {
        CachePolicy { max_age }
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::try_from(format!("max-age={}", self.max_age))
            .expect("max-age directive should be a valid header value")
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(CACHE_CONTROL, self.header_value());
    }
}
