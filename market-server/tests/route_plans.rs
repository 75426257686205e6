//! Route planner integration tests
//!
//! The optimizer is scripted through the `RouteOptimizer` seam; persistence
//! runs against a real embedded database so the transactional guarantees
//! are exercised, not mocked.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use shared::{GeoPoint, ListingMatch, ProductSnapshot, RoutePlanStatus, SellerSnapshot};

use market_server::db::models::{Product, Seller};
use market_server::db::repository::{RepoError, RoutePlanRepository};
use market_server::routing::optimizer::ProposedOrder;
use market_server::routing::{OptimizerError, RouteOptimizer, RouteOutcome, RoutePlanner};
use support::{id_of, seed_product, seed_seller, test_db};

/// Optimizer that always answers with a fixed order
struct ScriptedOptimizer {
    response: Vec<serde_json::Value>,
}

#[async_trait]
impl RouteOptimizer for ScriptedOptimizer {
    async fn propose_order(
        &self,
        _request: &market_server::routing::OptimizeRequest,
    ) -> Result<(ProposedOrder, String), OptimizerError> {
        let body = serde_json::to_string(&self.response).unwrap();
        Ok((self.response.clone(), body))
    }
}

/// Optimizer that always fails, standing in for timeouts and outages
struct FailingOptimizer;

#[async_trait]
impl RouteOptimizer for FailingOptimizer {
    async fn propose_order(
        &self,
        _request: &market_server::routing::OptimizeRequest,
    ) -> Result<(ProposedOrder, String), OptimizerError> {
        Err(OptimizerError::Transport("connection timed out".to_string()))
    }
}

fn listing(seller: &Seller, product: &Product, distance_km: f64) -> ListingMatch {
    ListingMatch {
        seller: SellerSnapshot {
            id: id_of(&seller.id),
            name: seller.name.clone(),
            shop_name: seller.shop_name.clone(),
            shop_address: None,
            location: seller.location.unwrap(),
        },
        product: ProductSnapshot {
            id: id_of(&product.id),
            name: product.name.clone(),
            category: None,
            price: product.price,
            stock: product.stock,
            online_stock: product.online_stock,
            rating: 0.0,
            rating_count: 0,
        },
        distance_km,
    }
}

/// Three sellers at 1, 2 and 3 degrees east of the origin, one product each
async fn seed_shopping_list(
    db: &surrealdb::Surreal<surrealdb::engine::local::Db>,
) -> Vec<ListingMatch> {
    let mut items = Vec::new();
    for (i, lng) in [1.0, 2.0, 3.0].iter().enumerate() {
        let seller = seed_seller(db, &format!("shop{i}"), Some(GeoPoint::new(0.0, *lng))).await;
        let product = seed_product(db, &seller, &format!("item{i}"), None, 5.0, 3, 3).await;
        items.push(listing(&seller, &product, 111.19 * *lng));
    }
    items
}

fn planner_with(
    db: &surrealdb::Surreal<surrealdb::engine::local::Db>,
    optimizer: Option<Arc<dyn RouteOptimizer>>,
) -> RoutePlanner {
    RoutePlanner::new(RoutePlanRepository::new(db.clone()), optimizer)
}

async fn count_rows(
    db: &surrealdb::Surreal<surrealdb::engine::local::Db>,
    table: &str,
) -> i64 {
    #[derive(serde::Deserialize)]
    struct Row {
        total: i64,
    }
    let rows: Vec<Row> = db
        .query(format!("SELECT count() AS total FROM {table} GROUP ALL"))
        .await
        .unwrap()
        .take(0)
        .unwrap();
    rows.first().map(|r| r.total).unwrap_or(0)
}

#[tokio::test]
async fn optimizer_order_becomes_dense_stop_orders() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(2), json!(0), json!(1)],
        })),
    );

    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items.clone())
        .await
        .unwrap();

    let RouteOutcome::Planned(planned) = outcome else {
        panic!("expected a persisted plan");
    };

    assert_eq!(planned.plan.status, RoutePlanStatus::Active);
    assert_eq!(planned.plan.owner, "buyer-1");
    assert_eq!(planned.stops.len(), 3);

    // stop_order 1,2,3 map to original indices 2,0,1
    for (position, original_idx) in [2usize, 0, 1].iter().enumerate() {
        let stop = &planned.stops[position];
        assert_eq!(stop.stop_order, position as i64 + 1);
        assert_eq!(stop.product.to_string(), items[*original_idx].product.id);
        assert_eq!(stop.seller.to_string(), items[*original_idx].seller.id);
        assert_eq!(stop.shop_lng, items[*original_idx].seller.location.lng);
    }

    // Raw payloads stored verbatim
    assert_eq!(planned.plan.optimizer_response, "[2,0,1]");
    assert!(planned.plan.optimizer_request.contains("\"stops\""));
}

#[tokio::test]
async fn invalid_indices_are_dropped_not_fatal() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(5), json!("x"), json!(1)],
        })),
    );

    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items.clone())
        .await
        .unwrap();

    let RouteOutcome::Planned(planned) = outcome else {
        panic!("expected a persisted plan");
    };

    // Only index 1 survived
    assert_eq!(planned.stops.len(), 1);
    assert_eq!(planned.stops[0].stop_order, 1);
    assert_eq!(planned.stops[0].product.to_string(), items[1].product.id);
}

#[tokio::test]
async fn duplicate_indices_are_kept_as_returned() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(1), json!(1), json!(0)],
        })),
    );

    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap();

    let RouteOutcome::Planned(planned) = outcome else {
        panic!("expected a persisted plan");
    };
    assert_eq!(planned.stops.len(), 3);
    assert_eq!(planned.stops[0].product, planned.stops[1].product);
}

#[tokio::test]
async fn optimizer_failure_falls_back_nearest_first() {
    let (_tmp, db) = test_db().await;

    // Stops at (0,1) and (0,2), listed farthest first
    let far = seed_seller(&db, "far", Some(GeoPoint::new(0.0, 2.0))).await;
    let near = seed_seller(&db, "near", Some(GeoPoint::new(0.0, 1.0))).await;
    let far_product = seed_product(&db, &far, "far item", None, 5.0, 3, 3).await;
    let near_product = seed_product(&db, &near, "near item", None, 5.0, 3, 3).await;
    let items = vec![
        listing(&far, &far_product, 222.4),
        listing(&near, &near_product, 111.2),
    ];

    let planner = planner_with(&db, Some(Arc::new(FailingOptimizer)));

    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap();

    let RouteOutcome::Fallback(route) = outcome else {
        panic!("expected fallback");
    };

    assert!(route.fallback);
    // Nearest first: (0,1) before (0,2)
    assert_eq!(route.visit_order, vec![1, 0]);
    assert_eq!(route.stops[0].seller.location.lng, 1.0);
    assert_eq!(route.stops[1].seller.location.lng, 2.0);

    // The fallback path never persists a plan
    assert_eq!(count_rows(&db, "route_plan").await, 0);
    assert_eq!(count_rows(&db, "route_plan_stop").await, 0);
}

#[tokio::test]
async fn missing_optimizer_also_falls_back() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(&db, None);
    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap();

    assert!(matches!(outcome, RouteOutcome::Fallback(_)));
}

#[tokio::test]
async fn empty_shopping_list_is_a_noop() {
    let (_tmp, db) = test_db().await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer { response: vec![] })),
    );
    let outcome = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, Vec::new())
        .await
        .unwrap();

    assert!(matches!(outcome, RouteOutcome::Empty));
    assert_eq!(count_rows(&db, "route_plan").await, 0);
}

#[tokio::test]
async fn get_route_plan_round_trips_in_stop_order() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(2), json!(1), json!(0)],
        })),
    );

    let RouteOutcome::Planned(planned) = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap()
    else {
        panic!("expected a persisted plan");
    };

    let plan_id = id_of(&planned.plan.id);
    let fetched = planner.get_route_plan(&plan_id).await.unwrap().unwrap();

    assert_eq!(fetched.stops.len(), 3);
    let orders: Vec<i64> = fetched.stops.iter().map(|s| s.stop_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn unknown_plan_is_an_absent_result() {
    let (_tmp, db) = test_db().await;
    let planner = planner_with(&db, None);
    assert!(planner.get_route_plan("route_plan:nope").await.unwrap().is_none());
}

#[tokio::test]
async fn status_transitions_end_in_terminal_states() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(0), json!(1), json!(2)],
        })),
    );
    let RouteOutcome::Planned(planned) = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap()
    else {
        panic!("expected a persisted plan");
    };
    let plan_id = id_of(&planned.plan.id);

    let repo = RoutePlanRepository::new(db.clone());
    let completed = repo
        .update_status(&plan_id, RoutePlanStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, RoutePlanStatus::Completed);

    // Terminal plans refuse further transitions
    let err = repo
        .update_status(&plan_id, RoutePlanStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .update_status("route_plan:nope", RoutePlanStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_plan_cascades_to_stops() {
    let (_tmp, db) = test_db().await;
    let items = seed_shopping_list(&db).await;

    let planner = planner_with(
        &db,
        Some(Arc::new(ScriptedOptimizer {
            response: vec![json!(0), json!(1), json!(2)],
        })),
    );
    let RouteOutcome::Planned(planned) = planner
        .optimize_route("buyer-1", GeoPoint::new(0.0, 0.0), None, items)
        .await
        .unwrap()
    else {
        panic!("expected a persisted plan");
    };
    let plan_id = id_of(&planned.plan.id);

    assert_eq!(count_rows(&db, "route_plan_stop").await, 3);

    let repo = RoutePlanRepository::new(db.clone());
    repo.delete_with_stops(&plan_id).await.unwrap();

    assert_eq!(count_rows(&db, "route_plan").await, 0);
    assert_eq!(count_rows(&db, "route_plan_stop").await, 0);
    assert!(repo.find_with_stops(&plan_id).await.unwrap().is_none());
}
