//! Age-gate rule chain
//!
//! Rules run in order and the first one that matches allows the request.
//! A request no rule allows is sent to the age confirmation page.
//!
//! | # | Rule | Allows when |
//! |---|------|-------------|
//! | 1 | exempt prefix | path under `/static/`, `/media/`, `/api/`, `/i18n/`, or `/favicon.ico` |
//! | 2 | privileged | staff or superuser |
//! | 3 | safe method | GET, HEAD, OPTIONS |
//! | 4 | exempt route | the route is flagged exempt in the route table |
//! | 5 | confirmed | `AGE_VERIFIED_21=1` cookie |
//!
//! Safe methods are never blocked; 21+ content on pages is marked `locked`
//! instead.

use http::Method;

/// Paths the gate never inspects
pub const EXEMPT_PREFIXES: [&str; 5] = ["/static/", "/media/", "/api/", "/i18n/", "/favicon.ico"];

/// Facts about one request, gathered by the middleware
#[derive(Debug, Clone)]
pub struct GateRequest<'a> {
    pub path: &'a str,
    pub method: &'a Method,
    pub privileged: bool,
    pub route_exempt: bool,
    pub age_verified: bool,
}

/// Why a request was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    ExemptPrefix,
    Privileged,
    SafeMethod,
    ExemptRoute,
    AgeConfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow(AllowReason),
    /// Send to the age confirmation page
    Confirm,
}

type Rule = fn(&GateRequest<'_>) -> bool;

const RULES: [(AllowReason, Rule); 5] = [
    (AllowReason::ExemptPrefix, |r| {
        EXEMPT_PREFIXES.iter().any(|p| r.path.starts_with(p))
    }),
    (AllowReason::Privileged, |r| r.privileged),
    (AllowReason::SafeMethod, |r| {
        matches!(*r.method, Method::GET | Method::HEAD | Method::OPTIONS)
    }),
    (AllowReason::ExemptRoute, |r| r.route_exempt),
    (AllowReason::AgeConfirmed, |r| r.age_verified),
];

pub fn evaluate(request: &GateRequest<'_>) -> GateDecision {
    RULES
        .iter()
        .find(|(_, rule)| rule(request))
        .map(|(reason, _)| GateDecision::Allow(*reason))
        .unwrap_or(GateDecision::Confirm)
}
