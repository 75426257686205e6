//! Nearby search API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/nearby", get(handler::nearby_products))
        .route("/api/nearby-shops", get(handler::nearby_shops))
}
