//! Core module: configuration, state and server lifecycle
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared request state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{BrandContacts, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
