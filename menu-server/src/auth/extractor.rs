//! User extractors
//!
//! - [`CurrentUser`] - signed-in user, rejects anonymous callers
//! - [`StaffUser`] - staff or superuser
//! - [`MaybeUser`] - never rejects
//!
//! The [`identify`](super::middleware::identify) middleware has normally
//! decoded the session already; the extractors fall back to the
//! `Authorization` header when it has not run.
//!
//! Rejections follow the caller: programmatic requests get a JSON error,
//! browsers are sent to the login page with `next` pointing back.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use shared::Lang;

use crate::AppError;
use crate::age_gate::RouteName;
use crate::auth::{CurrentUser, JwtService};
use crate::auth::middleware::jwt_error_to_app;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::format::wants_json;
use crate::utils::urls::with_next;

/// Staff member or superuser
#[derive(Debug, Clone)]
pub struct StaffUser(pub CurrentUser);

/// Signed-in user when there is one
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

fn user_from_parts(parts: &mut Parts, state: &ServerState) -> Result<CurrentUser, AppError> {
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(user.clone());
    }

    let token = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or_else(AppError::unauthorized)?;

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = parts.uri.path());
        jwt_error_to_app(&e)
    })?;
    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;

    parts.extensions.insert(user.clone());
    Ok(user)
}

/// JSON error, or a redirect to the login page for browsers
fn reject(parts: &Parts, error: AppError) -> Response {
    if wants_json(&parts.headers) {
        return error.into_response();
    }
    let lang = parts.extensions.get::<Lang>().copied().unwrap_or_default();
    let back = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Redirect::to(&with_next(&RouteName::Login.url(lang, None), back)).into_response()
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        user_from_parts(parts, state).map_err(|e| reject(parts, e))
    }
}

impl FromRequestParts<ServerState> for StaffUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_privileged() {
            return Ok(StaffUser(user));
        }

        security_log!(
            "WARN",
            "staff_required",
            user_id = user.id,
            username = user.username.clone(),
            uri = parts.uri.path()
        );
        if wants_json(&parts.headers) {
            Err(AppError::staff_required().into_response())
        } else {
            // Signed in but not staff: logging in again would not help
            let lang = parts.extensions.get::<Lang>().copied().unwrap_or_default();
            Err(Redirect::to(&RouteName::Home.url(lang, None)).into_response())
        }
    }
}

impl FromRequestParts<ServerState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(user_from_parts(parts, state).ok()))
    }
}
