//! Route planning types
//!
//! The optimizer wire format plus the planner's result type. Request and
//! response payloads are also stored verbatim on the persisted plan for
//! audit.

use serde::{Deserialize, Serialize};
use shared::{GeoPoint, ListingMatch};

use crate::db::models::RoutePlanWithStops;

/// One stop as sent to the optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeStop {
    pub seller_id: String,
    pub seller_name: String,
    pub product_id: String,
    pub product_name: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_from_origin: f64,
}

/// Optimizer request: origin, optional destination (`null` means "return to
/// origin") and the unordered stops. The optimizer answers with nothing but
/// an index order into `stops`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub origin: GeoPoint,
    pub destination: Option<GeoPoint>,
    pub stops: Vec<OptimizeStop>,
}

impl OptimizeRequest {
    /// Build a request from a shopping list. Items keep their positions:
    /// the optimizer answers with indices into this very list.
    pub fn from_shopping_list(
        origin: GeoPoint,
        destination: Option<GeoPoint>,
        items: &[ListingMatch],
    ) -> Self {
        Self {
            origin,
            destination,
            stops: items
                .iter()
                .map(|item| OptimizeStop {
                    seller_id: item.seller.id.clone(),
                    seller_name: item.seller.display_name().to_string(),
                    product_id: item.product.id.clone(),
                    product_name: item.product.name.clone(),
                    lat: item.seller.location.lat,
                    lng: item.seller.location.lng,
                    distance_from_origin: item.distance_km,
                })
                .collect(),
        }
    }
}

/// An unpersisted route computed by the nearest-neighbor heuristic
#[derive(Debug, Clone, Serialize)]
pub struct FallbackRoute {
    /// Indices into the submitted shopping list, in visiting order
    pub visit_order: Vec<usize>,
    /// The shopping-list items in visiting order
    pub stops: Vec<ListingMatch>,
    /// Always true; distinguishes this from an optimizer-backed plan
    pub fallback: bool,
}

/// Result of a route-planning request.
///
/// Planning is best-effort: an optimizer failure degrades to `Fallback`,
/// and only an empty shopping list produces no route at all.
#[derive(Debug)]
pub enum RouteOutcome {
    /// Optimizer succeeded; the plan and its stops are persisted
    Planned(RoutePlanWithStops),
    /// Optimizer failed; in-memory nearest-neighbor route, not persisted
    Fallback(FallbackRoute),
    /// Empty shopping list: nothing to plan
    Empty,
}
