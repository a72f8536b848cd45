//! Admin API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/restaurants", get(handler::list_restaurants))
        .route(
            "/restaurants/{id}",
            patch(handler::set_restaurant_status).put(handler::update_restaurant),
        )
        .route("/reservations", get(handler::list_reservations))
        .route("/reviews", get(handler::list_reviews))
        .route(
            "/reviews/{id}",
            patch(handler::moderate_review).delete(handler::delete_review),
        )
}
