//! Review API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id).put(handler::update).delete(handler::delete),
        )
        .route("/{id}/status", put(handler::set_status))
        .route("/{id}/like", put(handler::toggle_like))
        .route("/{id}/replies", post(handler::add_reply))
        .route("/{id}/replies/{reply_id}", delete(handler::delete_reply))
}
