//! Owner dashboard API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/owner", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/restaurant", get(handler::my_restaurant))
        .route("/restaurant/stats", get(handler::my_stats))
}
