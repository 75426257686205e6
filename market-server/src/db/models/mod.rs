//! Database Models

// Serde helpers
pub mod serde_thing;

// Catalog
pub mod product;
pub mod seller;

// Reviews
pub mod review;

// Routing
pub mod route_plan;

// Re-exports
pub use product::{Product, ProductCreate, ProductId, ProductUpdate, normalize_price};
pub use review::{Review, ReviewId};
pub use route_plan::{RoutePlan, RoutePlanId, RoutePlanStop, RoutePlanWithStops};
pub use seller::{Seller, SellerCreate, SellerId};
