//! Reservation API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_mine).post(handler::create))
        .route("/restaurant/{restaurant_id}", get(handler::list_for_restaurant))
        .route("/{id}", get(handler::get_by_id).put(handler::update_status))
}
