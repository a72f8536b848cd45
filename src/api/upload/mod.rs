//! Upload API module

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/upload", routes())
}

fn routes() -> Router<ServerState> {
    // The default body limit is far below a batch of full-size images;
    // raise it here so the per-file checks in the handler apply.
    Router::new()
        .route("/restaurant-images", post(handler::restaurant_images))
        .layer(DefaultBodyLimit::max(handler::MAX_BODY_SIZE))
}
