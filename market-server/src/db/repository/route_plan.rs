//! Route Plan Repository
//!
//! A plan and its stops are written in one transaction: either the whole
//! route lands or nothing does. Plans are write-once; only `status` changes
//! afterwards.

use serde::Serialize;
use shared::{GeoPoint, RoutePlanStatus};

use super::{BaseRepository, RepoError, RepoResult, make_thing};
use crate::db::models::{RoutePlan, RoutePlanStop, RoutePlanWithStops};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PLAN_TABLE: &str = "route_plan";

/// Stop fields as persisted, keyed by pure record ids. `stop_order` is
/// assigned by the planner before the write.
#[derive(Debug, Clone, Serialize)]
pub struct StopSeed {
    /// Seller id without table prefix
    pub seller: String,
    /// Product id without table prefix
    pub product: String,
    pub stop_order: i64,
    pub shop_lat: f64,
    pub shop_lng: f64,
    pub estimated_arrival: Option<String>,
}

/// Plan fields as persisted
#[derive(Debug, Clone, Serialize)]
pub struct PlanSeed {
    pub owner: String,
    pub origin: GeoPoint,
    pub destination: Option<GeoPoint>,
    pub optimizer_request: String,
    pub optimizer_response: String,
}

const CREATE_WITH_STOPS: &str = "
    BEGIN TRANSACTION;
    LET $created = (CREATE ONLY route_plan CONTENT {
        owner: $owner,
        origin: $origin,
        destination: $destination,
        optimizer_request: $request,
        optimizer_response: $response,
        status: 'active',
        created_at: time::now()
    });
    FOR $stop IN $stops {
        CREATE route_plan_stop CONTENT {
            plan: $created.id,
            seller: type::thing('seller', $stop.seller),
            product: type::thing('product', $stop.product),
            stop_order: $stop.stop_order,
            shop_lat: $stop.shop_lat,
            shop_lng: $stop.shop_lng,
            estimated_arrival: $stop.estimated_arrival
        };
    };
    RETURN $created;
    COMMIT TRANSACTION;
";

#[derive(Clone)]
pub struct RoutePlanRepository {
    base: BaseRepository,
}

impl RoutePlanRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a plan and its stops atomically, returning the stored plan
    pub async fn create_with_stops(
        &self,
        plan: PlanSeed,
        stops: Vec<StopSeed>,
    ) -> RepoResult<RoutePlan> {
        let mut result = self
            .base
            .db()
            .query(CREATE_WITH_STOPS)
            .bind(("owner", plan.owner))
            .bind(("origin", plan.origin))
            .bind(("destination", plan.destination))
            .bind(("request", plan.optimizer_request))
            .bind(("response", plan.optimizer_response))
            .bind(("stops", stops))
            .await?;
        let created: Option<RoutePlan> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create route plan".to_string()))
    }

    /// Fetch a plan together with its stops ordered by `stop_order`
    pub async fn find_with_stops(&self, id: &str) -> RepoResult<Option<RoutePlanWithStops>> {
        let thing = make_thing(PLAN_TABLE, id);

        let key = thing.id.to_raw();
        let plan: Option<RoutePlan> = self.base.db().select((PLAN_TABLE, key.as_str())).await?;
        let Some(plan) = plan else {
            return Ok(None);
        };

        let stops: Vec<RoutePlanStop> = self
            .base
            .db()
            .query("SELECT * FROM route_plan_stop WHERE plan = $plan ORDER BY stop_order ASC")
            .bind(("plan", thing))
            .await?
            .take(0)?;

        Ok(Some(RoutePlanWithStops { plan, stops }))
    }

    /// Plans owned by a buyer, newest first
    pub async fn find_by_owner(&self, owner: &str) -> RepoResult<Vec<RoutePlan>> {
        let plans: Vec<RoutePlan> = self
            .base
            .db()
            .query("SELECT * FROM route_plan WHERE owner = $owner ORDER BY created_at DESC")
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(plans)
    }

    /// Transition a plan out of `active`.
    ///
    /// The guard runs inside the UPDATE so a racing transition cannot apply
    /// twice. Terminal plans reject further changes.
    pub async fn update_status(&self, id: &str, status: RoutePlanStatus) -> RepoResult<RoutePlan> {
        let thing = make_thing(PLAN_TABLE, id);

        let mut result = self
            .base
            .db()
            .query("UPDATE $plan SET status = $status WHERE status = 'active' RETURN AFTER")
            .bind(("plan", thing.clone()))
            .bind(("status", status))
            .await?;
        let plans: Vec<RoutePlan> = result.take(0)?;

        if let Some(plan) = plans.into_iter().next() {
            return Ok(plan);
        }

        // Guard failed: distinguish a missing plan from a terminal one
        let key = thing.id.to_raw();
        let existing: Option<RoutePlan> =
            self.base.db().select((PLAN_TABLE, key.as_str())).await?;
        match existing {
            Some(plan) => Err(RepoError::Validation(format!(
                "Route plan {id} is already {} and cannot change status",
                plan.status
            ))),
            None => Err(RepoError::NotFound(format!("Route plan {id} not found"))),
        }
    }

    /// Delete a plan and all its stops in one transaction
    pub async fn delete_with_stops(&self, id: &str) -> RepoResult<()> {
        let thing = make_thing(PLAN_TABLE, id);

        let key = thing.id.to_raw();
        let existing: Option<RoutePlan> =
            self.base.db().select((PLAN_TABLE, key.as_str())).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Route plan {id} not found")));
        }

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 DELETE route_plan_stop WHERE plan = $plan; \
                 DELETE $plan; \
                 COMMIT TRANSACTION;",
            )
            .bind(("plan", thing))
            .await?
            .check()?;
        Ok(())
    }
}
