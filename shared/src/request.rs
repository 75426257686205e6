//! Request types
//!
//! Query and body payloads accepted by the market server.

use serde::{Deserialize, Serialize};

use crate::listing::ListingMatch;
use crate::types::{GeoPoint, PurchaseOption, RoutePlanStatus};

/// Query parameters for the nearby product search.
///
/// `name` and `category` narrow the scan; the rest of the fields are the
/// secondary filters applied after distance ranking. Omitted filters are
/// no-ops.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    /// Case-insensitive substring match on the product name
    pub name: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Search radius in kilometers; server default applies when omitted
    pub max_km: Option<f64>,

    // Secondary filters
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub in_stock_only: bool,
    /// Which stock pool `in_stock_only` checks; defaults to delivery
    pub mode: Option<PurchaseOption>,
}

/// Query parameters for the seller-level shop search.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyShopsQuery {
    pub lat: f64,
    pub lng: f64,
    pub max_km: Option<f64>,
}

/// Availability check parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub quantity: i64,
    pub mode: PurchaseOption,
}

/// Stock decrement payload (a sale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDecrement {
    pub quantity: i64,
    pub mode: PurchaseOption,
}

/// Administrative stock reset payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub stock: i64,
    pub online_stock: i64,
}

/// Review submission. A repeat submission by the same author overwrites the
/// earlier rating/comment instead of adding a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmit {
    /// Opaque external user id of the author
    pub author: String,
    /// Integer rating in [1, 5]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// Seller shop profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopLocationUpdate {
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_city: Option<String>,
    pub shop_pincode: Option<String>,
    /// New shop coordinates; `None` leaves the location unset
    pub location: Option<GeoPoint>,
}

/// Route optimization request: the shopping list a buyer assembled from
/// nearby-search results, plus where the trip starts and optionally ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanRequest {
    /// Opaque external user id of the buyer
    pub buyer: String,
    pub origin: GeoPoint,
    pub destination: Option<GeoPoint>,
    pub items: Vec<ListingMatch>,
}

/// Route plan status transition payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: RoutePlanStatus,
}
