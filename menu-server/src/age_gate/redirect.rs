//! `next` parameter validation
//!
//! Only same-site relative paths are followed. Anything else falls back to
//! the caller's default.

use http::header::{HOST, REFERER};
use http::{HeaderMap, Method, Uri};
use url::Url;

/// `Some(next)` when it is a local path that is safe to redirect to
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    let next = next?;
    let is_safe = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.chars().any(|c| c.is_control() || c == '\\');
    is_safe.then_some(next)
}

/// Where to send the visitor after confirming their age
///
/// Safe methods come back to the request itself. Unsafe ones (adding to
/// the order) are POST-only routes, so the page they were sent from is
/// used instead, taken from `Referer` when it points back to this site.
pub fn return_path(method: &Method, uri: &Uri, headers: &HeaderMap) -> Option<String> {
    if method.is_safe() {
        let current = uri.path_and_query().map(|pq| pq.as_str());
        return safe_next(current).map(str::to_string);
    }
    let referer = headers.get(REFERER)?.to_str().ok()?;
    let local = if referer.starts_with('/') {
        referer.to_string()
    } else {
        let url = Url::parse(referer).ok()?;
        let host = headers.get(HOST).and_then(|h| h.to_str().ok());
        if let Some(host) = host {
            let origin = match url.port() {
                Some(port) => format!("{}:{port}", url.host_str()?),
                None => url.host_str()?.to_string(),
            };
            if !origin.eq_ignore_ascii_case(host) {
                return None;
            }
        }
        match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        }
    };
    safe_next(Some(&local)).map(str::to_string)
}

/// Safe `next` or `fallback`
pub fn next_or(next: Option<&str>, fallback: &str) -> String {
    safe_next(next).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_paths_accepted() {
        assert_eq!(safe_next(Some("/")), Some("/"));
        assert_eq!(safe_next(Some("/kk/dishes/beer/")), Some("/kk/dishes/beer/"));
        assert_eq!(safe_next(Some("/order/?x=1")), Some("/order/?x=1"));
    }

    #[test]
    fn test_open_redirects_rejected() {
        for bad in [
            "https://evil.example/",
            "//evil.example/",
            "/\\evil.example",
            "/path\\..\\x",
            "javascript:alert(1)",
            "evil.example",
            "/ok\r\nSet-Cookie: x=1",
            "",
        ] {
            assert_eq!(safe_next(Some(bad)), None, "{bad:?} accepted");
        }
        assert_eq!(safe_next(None), None);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(next_or(Some("//evil"), "/"), "/");
        assert_eq!(next_or(Some("/order/"), "/"), "/order/");
        assert_eq!(next_or(None, "/en/"), "/en/");
    }

    fn headers(pairs: &[(http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_return_path_for_get_is_the_request() {
        let uri: Uri = "/en/dishes/beer/?x=1".parse().unwrap();
        assert_eq!(
            return_path(&Method::GET, &uri, &HeaderMap::new()).as_deref(),
            Some("/en/dishes/beer/?x=1")
        );
    }

    #[test]
    fn test_return_path_for_post_uses_referer() {
        let uri: Uri = "/en/order/add/7/".parse().unwrap();
        let with_referer = headers(&[
            (HOST, "localhost:8000"),
            (REFERER, "http://localhost:8000/en/dishes/lager/"),
        ]);
        assert_eq!(
            return_path(&Method::POST, &uri, &with_referer).as_deref(),
            Some("/en/dishes/lager/")
        );
        let relative = headers(&[(REFERER, "/kk/categories/beer/?page=2")]);
        assert_eq!(
            return_path(&Method::POST, &uri, &relative).as_deref(),
            Some("/kk/categories/beer/?page=2")
        );
    }

    #[test]
    fn test_return_path_for_post_never_echoes_the_action() {
        let uri: Uri = "/en/order/add/7/".parse().unwrap();
        assert_eq!(return_path(&Method::POST, &uri, &HeaderMap::new()), None);
        let foreign = headers(&[
            (HOST, "localhost:8000"),
            (REFERER, "https://evil.example/en/"),
        ]);
        assert_eq!(return_path(&Method::POST, &uri, &foreign), None);
        let garbage = headers(&[(REFERER, "not a url")]);
        assert_eq!(return_path(&Method::POST, &uri, &garbage), None);
    }
}
