//! Flash messages
//!
//! A message set before a redirect and shown once on the next page. It is
//! stored as percent-encoded JSON in the `menu_flash` cookie and removed
//! when read.

use serde::{Deserialize, Serialize};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use url::form_urlencoded;

pub const FLASH_COOKIE: &str = "menu_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Cookie-safe value: JSON with `;`, `,`, quotes and spaces escaped
    fn encode(&self) -> Option<String> {
        let json = serde_json::to_string(self).ok()?;
        Some(form_urlencoded::byte_serialize(json.as_bytes()).collect())
    }

    fn decode(raw: &str) -> Option<Self> {
        // the encoded value has no `=` or `&`, so it parses as a single key
        let (json, _) = form_urlencoded::parse(raw.as_bytes()).next()?;
        serde_json::from_str(&json).ok()
    }
}

fn cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Queue a message for the next page
pub fn push(cookies: &Cookies, level: FlashLevel, message: impl Into<String>) {
    match Flash::new(level, message).encode() {
        Some(value) => cookies.add(cookie(value)),
        None => tracing::warn!("Flash message could not be encoded"),
    }
}

/// Read and clear the pending message
pub fn take(cookies: &Cookies) -> Option<Flash> {
    let raw = cookies.get(FLASH_COOKIE)?.value().to_string();
    cookies.remove(cookie(String::new()));
    Flash::decode(&raw)
}
