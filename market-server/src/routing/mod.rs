//! Route Planning
//!
//! # Structure
//!
//! - [`types`] - optimizer wire format and the planner result type
//! - [`optimizer`] - the external-service seam and its HTTP implementation
//! - [`fallback`] - deterministic nearest-neighbor heuristic
//! - [`planner`] - the orchestrating service

pub mod fallback;
pub mod optimizer;
pub mod planner;
pub mod types;

pub use optimizer::{HttpRouteOptimizer, OptimizerError, RouteOptimizer};
pub use planner::RoutePlanner;
pub use types::{FallbackRoute, OptimizeRequest, OptimizeStop, RouteOutcome};
