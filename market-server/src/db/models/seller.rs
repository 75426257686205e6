//! Seller Model

use serde::{Deserialize, Serialize};
use shared::GeoPoint;
use surrealdb::sql::Thing;

use super::serde_thing;

pub type SellerId = Thing;

/// Seller entity - a small shop listing products on the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<SellerId>,
    /// Owner display name
    pub name: String,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_city: Option<String>,
    pub shop_pincode: Option<String>,
    /// Shop coordinates; `None` means the seller has not set a location yet
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl Seller {
    /// Coordinates usable for distance computations.
    ///
    /// Returns `None` for both an unset location and a legacy `(0,0)`
    /// sentinel row, so neither can enter a nearby listing.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        self.location.filter(|p| !p.is_unset())
    }
}

/// Create seller payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerCreate {
    pub name: String,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_city: Option<String>,
    pub shop_pincode: Option<String>,
    pub location: Option<GeoPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(location: Option<GeoPoint>) -> Seller {
        Seller {
            id: None,
            name: "Asha".to_string(),
            shop_name: Some("Asha General Store".to_string()),
            shop_address: None,
            shop_city: None,
            shop_pincode: None,
            location,
        }
    }

    #[test]
    fn sentinel_location_is_unusable() {
        assert!(seller(None).coordinates().is_none());
        assert!(seller(Some(GeoPoint::new(0.0, 0.0))).coordinates().is_none());
        assert_eq!(
            seller(Some(GeoPoint::new(12.9, 77.6))).coordinates(),
            Some(GeoPoint::new(12.9, 77.6))
        );
    }
}
