//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/products - all visible products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.product_repository().find_all().await?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .product_repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
    Ok(Json(product))
}

/// GET /api/categories - distinct categories across visible products
pub async fn list_categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let categories = state.product_repository().distinct_categories().await?;
    Ok(Json(categories))
}

/// POST /api/products - create a product listing
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;
    validate_price(payload.price)?;
    if payload.stock.is_some_and(|s| s < 0) || payload.online_stock.is_some_and(|s| s < 0) {
        return Err(AppError::Validation("stock counters must be non-negative".to_string()));
    }

    // The seller must exist before a listing can point at it
    let seller = state.seller_repository().find_by_id(&payload.seller).await?;
    if seller.is_none() {
        return Err(AppError::NotFound(format!("Seller {}", payload.seller)));
    }

    let product = state.product_repository().create(payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - update catalog fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    let product = state.product_repository().update(&id, payload).await?;
    Ok(Json(product))
}
