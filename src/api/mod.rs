//! API Route Modules
//!
//! One module per resource, each exposing a `router()` nested under its
//! `/api/...` prefix:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register, login, profile, favorites
//! - [`restaurants`] - public discovery and owner/admin management
//! - [`reservations`] - booking and the reservation state machine
//! - [`payments`] - deposit order creation and callback verification
//! - [`reviews`] - reviews, likes, owner replies, moderation
//! - [`menu`] - owner-scoped menu item CRUD
//! - [`owner`] - owner dashboard (restaurant + stats)
//! - [`admin`] - platform stats, listings, moderation
//! - [`upload`] - multipart image upload to the external host

pub mod admin;
pub mod auth;
pub mod health;
pub mod menu;
pub mod owner;
pub mod payments;
pub mod reservations;
pub mod restaurants;
pub mod reviews;
pub mod upload;

use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the full application router with CORS, tracing, and the
/// authentication middleware applied.
pub fn router(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(reservations::router())
        .merge(payments::router())
        .merge(reviews::router())
        .merge(menu::router())
        .merge(owner::router())
        .merge(admin::router())
        .merge(upload::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
