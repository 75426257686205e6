//! Server state

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    ProductRepository, ReviewRepository, RoutePlanRepository, SellerRepository,
};
use crate::inventory::InventoryService;
use crate::routing::{HttpRouteOptimizer, RouteOptimizer, RoutePlanner};
use crate::search::NearbySearch;

/// Shared state behind every handler.
///
/// Holds the configuration, the embedded database handle and the optimizer
/// client. `Clone` is shallow; handlers construct repositories and services
/// from the handle per request, the way the repositories themselves are
/// cheap wrappers over it.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    /// External optimizer; `None` when no endpoint is configured
    pub optimizer: Option<Arc<dyn RouteOptimizer>>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, optimizer: Option<Arc<dyn RouteOptimizer>>) -> Self {
        Self {
            config,
            db,
            optimizer,
        }
    }

    /// Initialize the server state:
    ///
    /// 1. ensure the working directory exists
    /// 2. open the embedded database and apply the schema
    /// 3. build the optimizer client when an endpoint is configured
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be initialized;
    /// the server is useless without either.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create work directory structure");

        let db_service = DbService::new(&db_dir)
            .await
            .expect("Failed to initialize database");

        let optimizer: Option<Arc<dyn RouteOptimizer>> = match &config.optimizer_url {
            Some(url) => {
                tracing::info!(endpoint = %url, "Route optimizer configured");
                Some(Arc::new(HttpRouteOptimizer::new(
                    url.clone(),
                    config.optimizer_timeout_ms,
                )))
            }
            None => {
                tracing::warn!("No OPTIMIZER_URL set; route planning will use the local fallback");
                None
            }
        };

        Self::new(config.clone(), db_service.db, optimizer)
    }

    // ── Service accessors ───────────────────────────────────────────

    pub fn seller_repository(&self) -> SellerRepository {
        SellerRepository::new(self.db.clone())
    }

    pub fn product_repository(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }

    pub fn review_repository(&self) -> ReviewRepository {
        ReviewRepository::new(self.db.clone())
    }

    pub fn route_plan_repository(&self) -> RoutePlanRepository {
        RoutePlanRepository::new(self.db.clone())
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.product_repository())
    }

    pub fn nearby_search(&self) -> NearbySearch {
        NearbySearch::new(self.product_repository(), self.seller_repository())
    }

    pub fn route_planner(&self) -> RoutePlanner {
        RoutePlanner::new(
            RoutePlanRepository::new(self.db.clone()),
            self.optimizer.clone(),
        )
    }
}
