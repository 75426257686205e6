//! Route Planner
//!
//! Orchestrates one planning request: build the optimizer payload, ask the
//! external service for a visiting order, validate what comes back, persist
//! plan + stops atomically. Any failure along that path, including the
//! persistence write itself, degrades to the deterministic
//! nearest-neighbor fallback instead of failing the
//! caller. Only an empty shopping list produces no route at all.

use std::sync::Arc;

use shared::{GeoPoint, ListingMatch};
use uuid::Uuid;

use super::fallback::nearest_neighbor_order;
use super::optimizer::RouteOptimizer;
use super::types::{FallbackRoute, OptimizeRequest, RouteOutcome};
use crate::db::models::RoutePlanWithStops;
use crate::db::repository::route_plan::{PlanSeed, StopSeed};
use crate::db::repository::{RepoError, RepoResult, RoutePlanRepository, strip_table_prefix};

#[derive(Clone)]
pub struct RoutePlanner {
    plans: RoutePlanRepository,
    optimizer: Option<Arc<dyn RouteOptimizer>>,
}

impl RoutePlanner {
    pub fn new(plans: RoutePlanRepository, optimizer: Option<Arc<dyn RouteOptimizer>>) -> Self {
        Self { plans, optimizer }
    }

    /// Plan a multi-stop shopping route for `buyer`.
    ///
    /// The shopping list arrives from nearby search, so every item carries
    /// usable seller coordinates.
    pub async fn optimize_route(
        &self,
        buyer: &str,
        origin: GeoPoint,
        destination: Option<GeoPoint>,
        shopping_list: Vec<ListingMatch>,
    ) -> RepoResult<RouteOutcome> {
        if shopping_list.is_empty() {
            return Ok(RouteOutcome::Empty);
        }

        let request = OptimizeRequest::from_shopping_list(origin, destination, &shopping_list);
        // Correlates the optimizer round-trip across log lines
        let request_id = Uuid::new_v4();

        let Some(optimizer) = &self.optimizer else {
            tracing::warn!("No route optimizer configured, using fallback");
            return Ok(self.fallback_route(origin, shopping_list));
        };

        let (proposed, raw_response) = match optimizer.propose_order(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(%request_id, error = %e, "Route optimization failed, using fallback");
                return Ok(self.fallback_route(origin, shopping_list));
            }
        };

        let order = validate_order(&proposed, shopping_list.len());
        tracing::debug!(
            %request_id,
            proposed = proposed.len(),
            accepted = order.len(),
            "Optimizer proposed visiting order"
        );

        match self
            .persist_plan(buyer, &request, &raw_response, &shopping_list, &order)
            .await
        {
            Ok(plan) => Ok(RouteOutcome::Planned(plan)),
            Err(e) => {
                // Matching the optimizer-failure path: a failed write rolls
                // the transaction back and the buyer still gets a route.
                tracing::error!(%request_id, error = %e, "Failed to persist route plan, using fallback");
                Ok(self.fallback_route(origin, shopping_list))
            }
        }
    }

    /// Fetch a persisted plan with its stops
    pub async fn get_route_plan(&self, plan_id: &str) -> RepoResult<Option<RoutePlanWithStops>> {
        self.plans.find_with_stops(plan_id).await
    }

    fn fallback_route(&self, origin: GeoPoint, shopping_list: Vec<ListingMatch>) -> RouteOutcome {
        let visit_order = nearest_neighbor_order(origin, &shopping_list);
        let stops = visit_order
            .iter()
            .map(|&idx| shopping_list[idx].clone())
            .collect();
        RouteOutcome::Fallback(FallbackRoute {
            visit_order,
            stops,
            fallback: true,
        })
    }

    async fn persist_plan(
        &self,
        buyer: &str,
        request: &OptimizeRequest,
        raw_response: &str,
        shopping_list: &[ListingMatch],
        order: &[usize],
    ) -> RepoResult<RoutePlanWithStops> {
        let stops: Vec<StopSeed> = order
            .iter()
            .enumerate()
            .map(|(position, &idx)| {
                let item = &shopping_list[idx];
                StopSeed {
                    seller: strip_table_prefix("seller", &item.seller.id).to_string(),
                    product: strip_table_prefix("product", &item.product.id).to_string(),
                    stop_order: position as i64 + 1,
                    shop_lat: item.seller.location.lat,
                    shop_lng: item.seller.location.lng,
                    estimated_arrival: None,
                }
            })
            .collect();

        let seed = PlanSeed {
            owner: buyer.to_string(),
            origin: request.origin,
            destination: request.destination,
            optimizer_request: serde_json::to_string(request)
                .unwrap_or_else(|_| "{}".to_string()),
            optimizer_response: raw_response.to_string(),
        };

        let plan = self.plans.create_with_stops(seed, stops).await?;
        let plan_id = plan
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();

        // Read back through the ordered query so the caller sees exactly
        // what was committed
        self.plans
            .find_with_stops(&plan_id)
            .await?
            .ok_or_else(|| {
                RepoError::Database(format!("Route plan {plan_id} vanished after commit"))
            })
    }
}

/// Keep only entries that are integers within `[0, len)`.
///
/// A partially garbage response still produces a usable (shorter) route;
/// dropped entries are logged, never fatal.
fn validate_order(proposed: &[serde_json::Value], len: usize) -> Vec<usize> {
    proposed
        .iter()
        .filter_map(|value| {
            let idx = value.as_u64().map(|v| v as usize);
            match idx {
                Some(idx) if idx < len => Some(idx),
                _ => {
                    tracing::warn!(entry = %value, "Dropping invalid optimizer index");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_in_range_integers() {
        let proposed = vec![json!(2), json!(0), json!(1)];
        assert_eq!(validate_order(&proposed, 3), vec![2, 0, 1]);
    }

    #[test]
    fn drops_out_of_range_and_non_integers() {
        let proposed = vec![json!(5), json!("x"), json!(1)];
        assert_eq!(validate_order(&proposed, 3), vec![1]);
    }

    #[test]
    fn drops_negative_and_fractional() {
        let proposed = vec![json!(-1), json!(0.5), json!(0)];
        assert_eq!(validate_order(&proposed, 3), vec![0]);
    }

    #[test]
    fn empty_response_yields_empty_order() {
        assert!(validate_order(&[], 3).is_empty());
    }
}
