//! Inventory API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/products/{id}/availability",
            get(handler::check_availability),
        )
        .route(
            "/api/products/{id}/stock/decrement",
            post(handler::decrement_stock),
        )
        .route("/api/products/{id}/inventory", put(handler::update_inventory))
}
