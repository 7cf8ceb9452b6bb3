//! Absolute URLs
//!
//! API payloads carry absolute image URLs. The origin comes from
//! `PUBLIC_BASE_URL` when configured, otherwise from the request's `Host`
//! (and `X-Forwarded-Proto`, for deployments behind a proxy).

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;
use url::form_urlencoded;

use crate::core::{Config, ServerState};

/// Percent-encode a query string value
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// `path?next=<encoded next>`
pub fn with_next(path: &str, next: &str) -> String {
    format!("{path}?next={}", encode_query_value(next))
}

/// Builds absolute URLs for the current request
#[derive(Debug, Clone)]
pub struct RequestUrls {
    /// `scheme://host[:port]`, empty when unknown
    origin: String,
    media_url: String,
}

impl RequestUrls {
    pub fn new(origin: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            media_url: media_url.into(),
        }
    }

    pub fn from_headers(config: &Config, headers: &HeaderMap) -> Self {
        let origin = match &config.public_base_url {
            Some(base) => base.clone(),
            None => {
                let host = headers
                    .get(http::header::HOST)
                    .and_then(|v| v.to_str().ok())
                    .filter(|h| is_valid_host(h));
                match host {
                    Some(host) => {
                        let scheme = headers
                            .get("x-forwarded-proto")
                            .and_then(|v| v.to_str().ok())
                            .filter(|p| *p == "https" || *p == "http")
                            .unwrap_or("http");
                        format!("{scheme}://{host}")
                    }
                    None => String::new(),
                }
            }
        };
        Self::new(origin, config.media_url.clone())
    }

    /// Absolute URL of a stored media file (`dishes/plov.jpg`)
    ///
    /// Values that already are absolute URLs pass through unchanged. Empty
    /// values give `None`.
    pub fn media(&self, stored: Option<&str>) -> Option<String> {
        let stored = stored.map(str::trim).filter(|s| !s.is_empty())?;
        if stored.starts_with("http://") || stored.starts_with("https://") {
            return Some(stored.to_string());
        }
        let path = if stored.starts_with('/') {
            stored.to_string()
        } else {
            format!("{}{}", self.media_url, stored)
        };
        Some(self.absolute(&path))
    }

    /// Absolute URL of a site path
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

/// Hostname with optional port; rejects anything that could smuggle a path
fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

impl FromRequestParts<ServerState> for RequestUrls {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&state.config, &parts.headers))
    }
}
