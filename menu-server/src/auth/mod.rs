//! Authentication
//!
//! - [`JwtService`] - session token signing and validation
//! - [`password`] - argon2 hashing
//! - [`session`] - session cookie
//! - [`identify`] - decodes the session for every request
//! - [`CurrentUser`] / [`StaffUser`] / [`MaybeUser`] - handler extractors
//! - [`require_staff`] - staff-only routers

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;

pub use extractor::{MaybeUser, StaffUser};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{identify, require_staff};
