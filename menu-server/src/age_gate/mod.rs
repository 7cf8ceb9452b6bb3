//! 21+ age gate
//!
//! - [`routes`] - typed page route table with exemption flags
//! - [`policy`] - ordered rule chain deciding each request
//! - [`middleware`] - axum adapter attached per route
//! - [`cookies`] - `AGE_VERIFIED_21` cookie
//! - [`redirect`] - `next` validation

pub mod cookies;
pub mod middleware;
pub mod policy;
pub mod redirect;
pub mod routes;

pub use cookies::{AGE_COOKIE, AgeVerified, confirm_age, is_age_verified};
pub use middleware::age_gate;
pub use policy::{GateDecision, evaluate};
pub use routes::RouteName;
