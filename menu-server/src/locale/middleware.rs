//! Locale middleware
//!
//! Resolves the request language once and stores it in the request
//! extensions; handlers take `Extension<Lang>`.

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderMap;
use shared::Lang;
use tower_cookies::Cookies;

use super::{LANG_COOKIE, split_prefix};

/// Best supported language from an `Accept-Language` value, honouring
/// q-weights
fn from_accept_language(value: &str) -> Option<Lang> {
    let mut best: Option<(Lang, f32)> = None;
    for part in value.split(',') {
        let mut pieces = part.split(';');
        let Some(lang) = pieces.next().and_then(Lang::parse) else {
            continue;
        };
        let q = pieces
            .find_map(|p| p.trim().strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);
        if q > 0.0 && best.is_none_or(|(_, best_q)| q > best_q) {
            best = Some((lang, q));
        }
    }
    best.map(|(lang, _)| lang)
}

/// Language for a request path, cookie value and headers
pub fn resolve_language(path: &str, cookie: Option<&str>, headers: &HeaderMap) -> Lang {
    if let (Some(lang), _) = split_prefix(path) {
        return lang;
    }
    if let Some(lang) = cookie.and_then(Lang::parse) {
        return lang;
    }
    headers
        .get(http::header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(from_accept_language)
        .unwrap_or_default()
}

/// Insert the request [`Lang`] into extensions
///
/// Needs `CookieManagerLayer` outside of it.
pub async fn locale_middleware(mut req: Request, next: Next) -> Response {
    let cookie = req
        .extensions()
        .get::<Cookies>()
        .and_then(|c| c.get(LANG_COOKIE))
        .map(|c| c.value().to_string());
    let lang = resolve_language(req.uri().path(), cookie.as_deref(), req.headers());
    req.extensions_mut().insert(lang);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(accept: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(http::header::ACCEPT_LANGUAGE, HeaderValue::from_static(accept));
        h
    }

    #[test]
    fn test_prefix_beats_cookie() {
        let lang = resolve_language("/en/order/", Some("kk"), &headers("ru"));
        assert_eq!(lang, Lang::En);
    }

    #[test]
    fn test_cookie_beats_header() {
        let lang = resolve_language("/order/", Some("kk"), &headers("en-US"));
        assert_eq!(lang, Lang::Kk);
    }

    #[test]
    fn test_accept_language_weights() {
        let lang = resolve_language("/", None, &headers("de-DE,de;q=0.9,en;q=0.5,kk;q=0.8"));
        assert_eq!(lang, Lang::Kk);
        let lang = resolve_language("/", None, &headers("en-GB"));
        assert_eq!(lang, Lang::En);
    }

    #[test]
    fn test_defaults_to_ru() {
        assert_eq!(resolve_language("/", Some("fr"), &headers("fr, de")), Lang::Ru);
        assert_eq!(resolve_language("/", None, &HeaderMap::new()), Lang::Ru);
    }
}
