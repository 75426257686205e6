//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`sellers`] - seller profiles and shop locations
//! - [`products`] - product catalog and categories
//! - [`inventory`] - availability, stock decrement, administrative reset
//! - [`reviews`] - product reviews and derived ratings
//! - [`nearby`] - proximity search for products and shops
//! - [`route_plans`] - multi-stop route planning

pub mod health;
pub mod inventory;
pub mod nearby;
pub mod products;
pub mod reviews;
pub mod route_plans;
pub mod sellers;

use axum::Router;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(sellers::router())
        .merge(products::router())
        .merge(inventory::router())
        .merge(reviews::router())
        .merge(nearby::router())
        .merge(route_plans::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
