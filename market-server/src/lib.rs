//! Market Server - proximity-aware local-commerce marketplace core
//!
//! # Architecture overview
//!
//! Buyers search for products sold by nearby small shops, check and reserve
//! stock, and plan multi-stop shopping routes. The route optimizer is an
//! external service; when it fails or is absent, a deterministic
//! nearest-neighbor heuristic answers instead.
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB, models, repositories
//! ├── geo/           # great-circle distance and formatting
//! ├── inventory/     # two-pool stock logic
//! ├── search/        # proximity search and result filtering
//! ├── routing/       # optimizer client, fallback heuristic, planner
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod geo;
pub mod inventory;
pub mod routing;
pub mod search;
pub mod utils;

// Re-export public types
pub use self::core::{Config, Server, ServerState, build_app};
pub use routing::{RouteOptimizer, RouteOutcome, RoutePlanner};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
