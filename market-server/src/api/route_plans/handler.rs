//! Route Plan API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::ListingMatch;
use shared::request::{RoutePlanRequest, StatusUpdate};

use crate::core::ServerState;
use crate::db::models::{RoutePlan, RoutePlanStop, RoutePlanWithStops};
use crate::routing::RouteOutcome;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, validate_coordinates, validate_origin, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Planning response. `empty` is a successful no-op: there was nothing to
/// plan, which is not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanResponse {
    Planned {
        plan: RoutePlan,
        stops: Vec<RoutePlanStop>,
    },
    Fallback {
        visit_order: Vec<usize>,
        stops: Vec<ListingMatch>,
        fallback: bool,
    },
    Empty,
}

/// POST /api/route-plans - plan a multi-stop shopping trip
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoutePlanRequest>,
) -> AppResult<Json<PlanResponse>> {
    validate_required_text(&payload.buyer, "buyer", MAX_SHORT_TEXT_LEN)?;
    validate_origin(&payload.origin)?;
    if let Some(ref destination) = payload.destination {
        validate_origin(destination)?;
    }
    for item in &payload.items {
        // Shopping lists come from nearby search, which never emits a
        // sentinel location; re-check here because the list crosses the
        // client and back.
        validate_coordinates(&item.seller.location)?;
        validate_required_text(&item.seller.id, "item seller id", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&item.product.id, "item product id", MAX_SHORT_TEXT_LEN)?;
    }

    let outcome = state
        .route_planner()
        .optimize_route(&payload.buyer, payload.origin, payload.destination, payload.items)
        .await?;

    let response = match outcome {
        RouteOutcome::Planned(RoutePlanWithStops { plan, stops }) => {
            PlanResponse::Planned { plan, stops }
        }
        RouteOutcome::Fallback(route) => PlanResponse::Fallback {
            visit_order: route.visit_order,
            stops: route.stops,
            fallback: route.fallback,
        },
        RouteOutcome::Empty => PlanResponse::Empty,
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct PlanListQuery {
    pub buyer: String,
}

/// GET /api/route-plans?buyer=.. - a buyer's plans, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PlanListQuery>,
) -> AppResult<Json<Vec<RoutePlan>>> {
    validate_required_text(&query.buyer, "buyer", MAX_SHORT_TEXT_LEN)?;
    let plans = state
        .route_plan_repository()
        .find_by_owner(&query.buyer)
        .await?;
    Ok(Json(plans))
}

/// GET /api/route-plans/:id - plan with stops in visiting order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RoutePlanWithStops>> {
    let plan = state
        .route_planner()
        .get_route_plan(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Route plan {id}")))?;
    Ok(Json(plan))
}

/// PATCH /api/route-plans/:id/status - transition out of `active`
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<RoutePlan>> {
    if !payload.status.is_terminal() {
        return Err(AppError::Validation(
            "a plan can only transition to a terminal status".to_string(),
        ));
    }

    let plan = state
        .route_plan_repository()
        .update_status(&id, payload.status)
        .await?;
    Ok(Json(plan))
}

/// DELETE /api/route-plans/:id - remove a plan and its stops
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    state.route_plan_repository().delete_with_stops(&id).await?;
    Ok(ok(true))
}
