//! Review API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/products/{id}/reviews",
        get(handler::list).post(handler::add),
    )
}
