//! Request language
//!
//! Page URLs carry the language as a path prefix, except Russian which is
//! unprefixed: `/dishes/plov/`, `/kk/dishes/plov/`, `/en/dishes/plov/`.
//!
//! Resolution order for a request:
//! 1. path prefix
//! 2. `menu_language` cookie
//! 3. `Accept-Language`
//! 4. `ru`

pub mod handler;
pub mod messages;
pub mod middleware;

use shared::Lang;

use crate::age_gate::policy::EXEMPT_PREFIXES;

pub use messages::Message;
pub use middleware::resolve_language;

/// Language preference cookie
pub const LANG_COOKIE: &str = "menu_language";

/// Path prefix of each language, `""` for the default
pub const fn prefix(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "",
        Lang::Kk => "/kk",
        Lang::En => "/en",
    }
}

/// Every page prefix routes are registered under
pub const PREFIXES: [&str; 3] = [prefix(Lang::Ru), prefix(Lang::Kk), prefix(Lang::En)];

/// Split a language prefix off `path`
///
/// `/kk/order/` → `(Some(Kk), "/order/")`, `/kk` → `(Some(Kk), "/")`,
/// `/kiosk/` → `(None, "/kiosk/")`.
pub fn split_prefix(path: &str) -> (Option<Lang>, &str) {
    for lang in [Lang::Kk, Lang::En] {
        if let Some(rest) = path.strip_prefix(prefix(lang)) {
            if rest.is_empty() {
                return (Some(lang), "/");
            }
            if rest.starts_with('/') {
                return (Some(lang), rest);
            }
        }
    }
    (None, path)
}

/// The same page in another language
///
/// Query strings are kept. Paths outside the localized pages (`/api/`,
/// `/static/`, `/i18n/` and friends) are returned as they are.
pub fn rewrite_prefix(path: &str, lang: Lang) -> String {
    if EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return path.to_string();
    }
    let (_, rest) = split_prefix(path);
    format!("{}{}", prefix(lang), rest)
}

/// Site path in `lang`: `localized(En, "/order/")` → `/en/order/`
pub fn localized(lang: Lang, path: &str) -> String {
    format!("{}{}", prefix(lang), path)
}

/// Language picker entry
#[derive(Debug, Clone, serde::Serialize)]
pub struct LangChoice {
    pub code: Lang,
    pub label: &'static str,
}

pub fn choices() -> Vec<LangChoice> {
    Lang::ALL
        .iter()
        .map(|lang| LangChoice {
            code: *lang,
            label: lang.label(),
        })
        .collect()
}
