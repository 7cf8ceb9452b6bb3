//! Language switch
//!
//! `POST /i18n/setlang/` with `language` and `next` form fields.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shared::Lang;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use super::{LANG_COOKIE, rewrite_prefix};
use crate::age_gate::redirect::safe_next;
use crate::core::ServerState;

#[derive(Debug, Deserialize)]
pub struct SetLanguageForm {
    pub language: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Store the preferred language and go back to `next` in that language
///
/// Unknown languages leave the cookie untouched.
pub async fn set_language(
    State(state): State<ServerState>,
    cookies: Cookies,
    Form(form): Form<SetLanguageForm>,
) -> Response {
    let next = safe_next(form.next.as_deref()).unwrap_or("/");

    let Some(lang) = Lang::parse(&form.language) else {
        tracing::debug!(language = %form.language, "Unsupported language requested");
        return Redirect::to(next).into_response();
    };

    cookies.add(
        Cookie::build((LANG_COOKIE, lang.code()))
            .path("/")
            .max_age(time::Duration::days(365))
            .same_site(SameSite::Lax)
            .secure(state.config.is_production())
            .build(),
    );

    Redirect::to(&rewrite_prefix(next, lang)).into_response()
}
