//! Route Plan Models

use serde::{Deserialize, Serialize};
use shared::{GeoPoint, RoutePlanStatus};
use surrealdb::sql::{Datetime, Thing};

use super::serde_thing;

pub type RoutePlanId = Thing;

/// A persisted multi-stop shopping route.
///
/// Created only by a successful optimization; written once together with its
/// stops in a single transaction and never mutated afterwards except for
/// `status`. Deleting a plan deletes its stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RoutePlanId>,
    /// Opaque external user id of the buyer who requested the route
    pub owner: String,
    pub origin: GeoPoint,
    pub destination: Option<GeoPoint>,
    /// Raw optimizer request payload, stored verbatim for audit
    pub optimizer_request: String,
    /// Raw optimizer response payload, stored verbatim for audit
    pub optimizer_response: String,
    pub status: RoutePlanStatus,
    pub created_at: Option<Datetime>,
}

/// One stop of a route plan.
///
/// `stop_order` is 1-based and dense within a plan. Coordinates are a
/// snapshot of the shop location at planning time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanStop {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    /// Owning plan reference
    #[serde(with = "serde_thing")]
    pub plan: Thing,
    /// Seller reference
    #[serde(with = "serde_thing")]
    pub seller: Thing,
    /// Product reference
    #[serde(with = "serde_thing")]
    pub product: Thing,
    pub stop_order: i64,
    pub shop_lat: f64,
    pub shop_lng: f64,
    pub estimated_arrival: Option<String>,
}

/// A plan together with its stops, ordered by `stop_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanWithStops {
    pub plan: RoutePlan,
    pub stops: Vec<RoutePlanStop>,
}
