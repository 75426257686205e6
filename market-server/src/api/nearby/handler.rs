//! Nearby Search API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::{GeoPoint, ListingMatch};
use shared::request::{NearbyQuery, NearbyShopsQuery};
use shared::response::NearbyShop;

use crate::core::ServerState;
use crate::search::{SearchFilters, filter_results};
use crate::utils::AppResult;
use crate::utils::validation::validate_origin;

/// GET /api/nearby - products within radius, closest first
///
/// Distance ranking happens first, then the secondary filters; both in one
/// request so clients get a final list.
pub async fn nearby_products(
    State(state): State<ServerState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<Vec<ListingMatch>>> {
    let origin = GeoPoint::new(query.lat, query.lng);
    validate_origin(&origin)?;
    let max_km = query
        .max_km
        .unwrap_or(state.config.default_search_radius_km);

    let results = state
        .nearby_search()
        .find_nearby(query.name, query.category, origin, max_km)
        .await?;

    let filters = SearchFilters {
        min_price: query.min_price,
        max_price: query.max_price,
        min_rating: query.min_rating,
        in_stock_only: query.in_stock_only,
        mode: query.mode,
    };

    Ok(Json(filter_results(results, &filters)))
}

/// GET /api/nearby-shops - sellers within radius, closest first
pub async fn nearby_shops(
    State(state): State<ServerState>,
    Query(query): Query<NearbyShopsQuery>,
) -> AppResult<Json<Vec<NearbyShop>>> {
    let origin = GeoPoint::new(query.lat, query.lng);
    validate_origin(&origin)?;
    let max_km = query
        .max_km
        .unwrap_or(state.config.default_search_radius_km);

    let shops = state.nearby_search().find_nearby_shops(origin, max_km).await?;
    Ok(Json(shops))
}
