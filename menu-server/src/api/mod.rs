//! JSON API
//!
//! Mounted under `/api/`, which the age gate never intercepts.
//!
//! - [`health`] - health checks
//! - [`catalog`] - read-only categories and dishes
//! - [`manage`] - staff catalog management

pub mod convert;

pub mod catalog;
pub mod health;
pub mod manage;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(manage::router())
}
