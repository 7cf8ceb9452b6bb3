//! Session cookie
//!
//! Browsers keep the JWT in an HttpOnly cookie; scripts and API clients may
//! send it as `Authorization: Bearer` instead.

use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use super::JwtService;

pub const SESSION_COOKIE: &str = "menu_session";

pub fn start_session(cookies: &Cookies, jwt: &JwtService, token: String, secure: bool) {
    cookies.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(jwt.session_max_age())
            .build(),
    );
}

pub fn end_session(cookies: &Cookies) {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
}

pub fn session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
