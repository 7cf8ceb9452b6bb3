//! Response format selection
//!
//! Order and kitchen actions answer browsers with a flash message and a
//! redirect, and scripts with a small JSON payload. A request counts as
//! programmatic when it sends `X-Requested-With: XMLHttpRequest` or accepts
//! `application/json`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;

pub fn wants_json(headers: &HeaderMap) -> bool {
    let xhr = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
    let accepts_json = headers
        .get(http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    xhr || accepts_json
}

/// How the caller wants the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Flash message + redirect
    Browser,
    /// `{ok, order_id, ...}` JSON
    Json,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if wants_json(headers) {
            ResponseFormat::Json
        } else {
            ResponseFormat::Browser
        }
    }

    pub fn is_json(self) -> bool {
        self == ResponseFormat::Json
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ResponseFormat {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_plain_browser_request() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert!(!wants_json(&headers));
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Browser);
    }

    #[test]
    fn test_xhr_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(wants_json(&headers));
    }

    #[test]
    fn test_accept_json() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(ResponseFormat::from_headers(&headers).is_json());
    }
}
