//! Age confirmation cookie

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::request::Parts;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

pub const AGE_COOKIE: &str = "AGE_VERIFIED_21";

/// Valid for one year
const AGE_COOKIE_DAYS: i64 = 365;

pub fn is_age_verified(cookies: &Cookies) -> bool {
    cookies
        .get(AGE_COOKIE)
        .is_some_and(|cookie| cookie.value() == "1")
}

/// Set `AGE_VERIFIED_21=1`; readable by page scripts, which blur 21+ items
pub fn confirm_age(cookies: &Cookies, secure: bool) {
    cookies.add(
        Cookie::build((AGE_COOKIE, "1"))
            .path("/")
            .max_age(time::Duration::days(AGE_COOKIE_DAYS))
            .same_site(SameSite::Lax)
            .secure(secure)
            .build(),
    );
}

/// Whether the client has confirmed being 21+
///
/// Reads the cookie jar placed in the extensions by `CookieManagerLayer`;
/// without one the answer is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeVerified(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for AgeVerified {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let verified = parts
            .extensions
            .get::<Cookies>()
            .is_some_and(is_age_verified);
        Ok(AgeVerified(verified))
    }
}
