//! DineEase Server - restaurant discovery, reservation and review platform
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, ServerState, Server
//! ├── common/        # Errors, logging
//! ├── auth/          # JWT authentication, access gate
//! ├── db/            # Embedded SurrealDB, models, repositories
//! ├── services/      # Rating aggregation, payment gateway, image host
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod auth;
pub mod common;
pub mod core;
pub mod db;
pub mod services;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use common::{AppError, AppResult};
pub use core::{Config, Server, ServerState};

// Re-export logger init
pub use common::logger::init_logger;

// Security logging macro - routes auth events to the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
