//! Read-only catalog API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/categories/ | GET | categories with their available dishes |
//! | /api/categories/{slug}/ | GET | one category |
//! | /api/dishes/{slug}/ | GET | one dish |
//!
//! Text is resolved for the request language. 21+ items carry
//! `locked: true` until the client confirms its age, with their data
//! still included.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/categories/", get(handler::list_categories))
        .route("/api/categories/{slug}/", get(handler::get_category))
        .route("/api/dishes/{slug}/", get(handler::get_dish))
}
