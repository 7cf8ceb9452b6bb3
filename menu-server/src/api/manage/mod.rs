//! Staff catalog management API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/manage/categories | GET, POST | list / create categories |
//! | /api/manage/categories/{id} | GET, PUT, DELETE | one category |
//! | /api/manage/dishes | GET, POST | list / create dishes |
//! | /api/manage/dishes/{id} | GET, PUT, DELETE | one dish |
//!
//! Every route requires a staff or superuser session. Payloads use the raw
//! per-language text (`{"ru": .., "kk": .., "en": ..}`), not the resolved
//! strings of the read-only API.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manage", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/{id}",
            get(handler::get_category)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
        .route("/dishes", get(handler::list_dishes).post(handler::create_dish))
        .route(
            "/dishes/{id}",
            get(handler::get_dish)
                .put(handler::update_dish)
                .delete(handler::delete_dish),
        )
        .layer(middleware::from_fn(require_staff))
}
