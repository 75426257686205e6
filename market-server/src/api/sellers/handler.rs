//! Seller API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::request::ShopLocationUpdate;

use crate::core::ServerState;
use crate::db::models::{Seller, SellerCreate};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_coordinates,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/sellers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Seller>>> {
    let sellers = state.seller_repository().find_all().await?;
    Ok(Json(sellers))
}

/// GET /api/sellers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Seller>> {
    let seller = state
        .seller_repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seller {id}")))?;
    Ok(Json(seller))
}

/// POST /api/sellers - register a seller profile
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SellerCreate>,
) -> AppResult<Json<Seller>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.shop_name, "shop_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.shop_address, "shop_address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.shop_city, "shop_city", MAX_SHORT_TEXT_LEN)?;
    if let Some(ref location) = payload.location {
        validate_coordinates(location)?;
    }

    let seller = state.seller_repository().create(payload).await?;
    Ok(Json(seller))
}

/// PUT /api/sellers/:id/location - update the shop profile
///
/// The `(0,0)` sentinel and out-of-range coordinates are rejected here, so
/// only usable locations (or an explicit `null`) ever reach storage.
pub async fn update_location(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ShopLocationUpdate>,
) -> AppResult<Json<Seller>> {
    validate_optional_text(&payload.shop_name, "shop_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.shop_address, "shop_address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.shop_city, "shop_city", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.shop_pincode, "shop_pincode", MAX_SHORT_TEXT_LEN)?;
    if let Some(ref location) = payload.location {
        validate_coordinates(location)?;
    }

    let seller = state
        .seller_repository()
        .update_shop_location(
            &id,
            payload.shop_name,
            payload.shop_address,
            payload.shop_city,
            payload.shop_pincode,
            payload.location,
        )
        .await?;
    Ok(Json(seller))
}
