//! Service layer
//!
//! - [`HttpService`] - HTTP router and middleware stack

pub mod http;

pub use http::HttpService;
