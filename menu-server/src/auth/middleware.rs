//! Authentication middleware
//!
//! [`identify`] runs on every request and never rejects: it decodes the
//! session token when there is one and inserts [`CurrentUser`] into the
//! request extensions. Access decisions are left to the extractors and to
//! [`require_staff`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use super::session::{end_session, session_token};
use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Where the token came from; a bad cookie is cleared, a bad header is not
enum TokenSource {
    Header,
    Cookie,
}

/// Identity middleware
///
/// Token lookup order:
/// 1. `Authorization: Bearer <token>`
/// 2. `menu_session` cookie
///
/// Needs `CookieManagerLayer` outside of it.
pub async fn identify(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let header_token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .map(str::to_string);
    let cookies = req.extensions().get::<Cookies>().cloned();

    let found = match header_token {
        Some(token) => Some((token, TokenSource::Header)),
        None => cookies
            .as_ref()
            .and_then(session_token)
            .map(|token| (token, TokenSource::Cookie)),
    };

    if let Some((token, source)) = found {
        let decoded = state
            .get_jwt_service()
            .validate_token(&token)
            .map_err(|e| e.to_string())
            .and_then(|claims| CurrentUser::try_from(claims).map_err(|e| e.to_string()));
        match decoded {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(error) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = error,
                    uri = req.uri().path()
                );
                if let (TokenSource::Cookie, Some(cookies)) = (source, &cookies) {
                    end_session(cookies);
                }
            }
        }
    }

    next.run(req).await
}

/// Staff-only middleware for whole routers
///
/// ```ignore
/// Router::new()
///     .route("/api/manage/dishes", post(handler::create))
///     .layer(middleware::from_fn(require_staff));
/// ```
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;

    if !user.is_privileged() {
        security_log!(
            "WARN",
            "staff_required",
            user_id = user.id,
            username = user.username.clone(),
            uri = req.uri().path()
        );
        return Err(AppError::staff_required());
    }

    Ok(next.run(req).await)
}

/// Map a token error to the boundary error
pub fn jwt_error_to_app(error: &JwtError) -> AppError {
    match error {
        JwtError::ExpiredToken => AppError::token_expired(),
        _ => AppError::invalid_token("Invalid token"),
    }
}
