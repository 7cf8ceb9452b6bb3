//! Menu Server - restaurant menu and ordering
//!
//! Serves the localized menu (ru / kk / en), takes orders from signed-in
//! guests and runs the kitchen queue. 21+ categories are hidden behind an
//! age confirmation.
//!
//! # Modules
//!
//! ```text
//! menu-server/src/
//! ├── core/        # configuration, state, server lifecycle
//! ├── db/          # SQLite pool and repositories
//! ├── auth/        # JWT sessions, Argon2 passwords, extractors
//! ├── locale/      # language prefix, cookie and messages
//! ├── age_gate/    # 21+ policy, cookie, per-route middleware
//! ├── orders/      # order state machine service
//! ├── pages/       # browser pages
//! ├── api/         # JSON API
//! ├── services/    # HTTP router assembly
//! └── utils/       # errors, flash, formats, logging
//! ```

pub mod age_gate;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod locale;
pub mod orders;
pub mod pages;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // a missing .env is normal outside development
        eprintln!("No .env loaded: {e}");
    }

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  ____  __  __
  / /|_/ / _ \/ __ \/ / / /
 / /  / /  __/ / / / /_/ /
/_/  /_/\___/_/ /_/\__,_/
    "#
    );
}
