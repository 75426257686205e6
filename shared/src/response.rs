//! Response types
//!
//! Payloads returned by the market server beyond the raw catalog models.

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Result of a stock availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub reason: String,
}

/// A shop returned by the seller-level nearby search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyShop {
    pub seller_id: String,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_city: Option<String>,
    pub location: GeoPoint,
    /// Rounded to 1 decimal place for display
    pub distance_km: f64,
    /// Human-readable distance ("350 m", "2.4 km")
    pub distance_display: String,
}
