//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::request::{AvailabilityQuery, InventoryUpdate, StockDecrement};
use shared::response::AvailabilityResponse;

use crate::core::ServerState;
use crate::db::models::Product;
use crate::inventory::DecrementOutcome;
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResult};

/// GET /api/products/:id/availability?quantity=..&mode=..
///
/// Always 200 with an availability verdict; unknown products report
/// unavailable rather than erroring (the check fails closed).
pub async fn check_availability(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    validate_quantity(query.quantity)?;
    let availability = state
        .inventory()
        .check_availability(&id, query.quantity, query.mode)
        .await?;
    Ok(Json(availability))
}

/// POST /api/products/:id/stock/decrement - a sale
pub async fn decrement_stock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StockDecrement>,
) -> AppResult<Json<Product>> {
    validate_quantity(payload.quantity)?;

    match state
        .inventory()
        .decrement_stock(&id, payload.quantity, payload.mode)
        .await?
    {
        DecrementOutcome::Applied(product) => Ok(Json(product)),
        DecrementOutcome::InsufficientStock { available } => Err(AppError::BusinessRule(format!(
            "Insufficient stock: only {available} available for {}",
            payload.mode
        ))),
        DecrementOutcome::ProductNotFound => {
            Err(AppError::NotFound(format!("Product {id}")))
        }
    }
}

/// PUT /api/products/:id/inventory - administrative stock reset
pub async fn update_inventory(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryUpdate>,
) -> AppResult<Json<Product>> {
    if payload.stock < 0 || payload.online_stock < 0 {
        return Err(AppError::Validation(
            "stock counters must be non-negative".to_string(),
        ));
    }

    let product = state
        .inventory()
        .update_inventory(&id, payload.stock, payload.online_stock)
        .await?;
    Ok(Json(product))
}
