//! HTTP service: router assembly and global middleware
//!
//! Layers, innermost first:
//! 1. per-route age gate (registered by [`crate::pages::router`])
//! 2. `identify` - session / bearer token → [`crate::auth::CurrentUser`]
//! 3. `locale_middleware` - request language
//! 4. cookie jar, CORS, compression
//! 5. access log

use axum::{Router, middleware};
use tower::Service;
use tower_cookies::CookieManagerLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api;
use crate::auth::identify;
use crate::core::ServerState;
use crate::locale::middleware::locale_middleware;
use crate::pages;

pub type OneshotResult =
    Result<http::Response<axum::body::Body>, Box<dyn std::error::Error + Send + Sync>>;

/// Access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Pages and JSON API (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(pages::router())
        .merge(api::router())
}

#[derive(Clone, Debug)]
pub struct HttpService {
    state: ServerState,
}

impl HttpService {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Fully layered application router
    pub fn router(&self) -> Router {
        api::health::mark_started();

        let config = &self.state.config;
        build_app()
            .nest_service("/static", ServeDir::new(&config.static_dir))
            .nest_service("/media", ServeDir::new(&config.media_dir))
            .layer(middleware::from_fn_with_state(self.state.clone(), identify))
            .layer(middleware::from_fn(locale_middleware))
            .with_state(self.state.clone())
            .layer(CookieManagerLayer::new())
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(log_request))
    }

    /// Run one request through the router without a listener
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        let mut service = self.router();
        match service.call(request).await {
            Ok(response) => Ok(response),
            Err(never) => match never {},
        }
    }
}
