//! Listing snapshots
//!
//! Nearby search returns owned snapshots rather than live references: the
//! shopping list a buyer assembles keeps the seller/product state as it was
//! at search time, decoupled from later catalog writes.

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Seller state captured at search time.
///
/// `location` is non-optional here: search only ever emits sellers with a
/// usable location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerSnapshot {
    /// Seller record id ("seller:xyz")
    pub id: String,
    pub name: String,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub location: GeoPoint,
}

impl SellerSnapshot {
    /// Shop name if set, owner name otherwise
    pub fn display_name(&self) -> &str {
        self.shop_name.as_deref().unwrap_or(&self.name)
    }
}

/// Product state captured at search time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product record id ("product:xyz")
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub online_stock: i64,
    pub rating: f64,
    pub rating_count: i64,
}

/// One nearby-search hit: a product, its seller and the distance from the
/// search origin. Also the unit of a shopping list handed to the route
/// planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingMatch {
    pub seller: SellerSnapshot,
    pub product: ProductSnapshot,
    /// Distance from the search origin, rounded to 2 decimal places for
    /// display. Radius checks happen on the full-precision value before
    /// rounding.
    pub distance_km: f64,
}
