//! Age-gate middleware
//!
//! Attached per route at registration:
//!
//! ```ignore
//! router.route(
//!     route.path(),
//!     post(handler).route_layer(middleware::from_fn(age_gate(route))),
//! );
//! ```
//!
//! Runs after the identity and locale middlewares, which supply
//! [`CurrentUser`] and [`Lang`].

use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::StatusCode;
use shared::Lang;
use shared::payload::OrderActionResponse;
use tower_cookies::Cookies;

use super::cookies::is_age_verified;
use super::policy::{GateDecision, GateRequest, evaluate};
use super::redirect::return_path;
use super::routes::RouteName;
use crate::auth::CurrentUser;
use crate::security_log;
use crate::utils::format::wants_json;
use crate::utils::urls::with_next;

/// Gate for one route
///
/// Rejected programmatic requests get `403 {"ok": false, "error": "age_required"}`;
/// browsers are redirected to the age page with `next` set to a page
/// they can return to with a GET.
pub fn age_gate(
    route: RouteName,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let privileged = req
                .extensions()
                .get::<CurrentUser>()
                .is_some_and(CurrentUser::is_privileged);
            let age_verified = req
                .extensions()
                .get::<Cookies>()
                .is_some_and(is_age_verified);

            let decision = evaluate(&GateRequest {
                path: req.uri().path(),
                method: req.method(),
                privileged,
                route_exempt: route.is_age_exempt(),
                age_verified,
            });

            match decision {
                GateDecision::Allow(_) => next.run(req).await,
                GateDecision::Confirm => {
                    security_log!(
                        "WARN",
                        "age_gate_blocked",
                        route = route.name(),
                        method = req.method().as_str(),
                        path = req.uri().path()
                    );
                    if wants_json(req.headers()) {
                        return (
                            StatusCode::FORBIDDEN,
                            Json(OrderActionResponse::failure(None, "age_required")),
                        )
                            .into_response();
                    }
                    let lang = req.extensions().get::<Lang>().copied().unwrap_or_default();
                    let gate = RouteName::AgeGate.url(lang, None);
                    let target = match return_path(req.method(), req.uri(), req.headers()) {
                        Some(back) => with_next(&gate, &back),
                        None => gate,
                    };
                    Redirect::to(&target).into_response()
                }
            }
        })
    }
}
