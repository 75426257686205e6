//! Common primitive types

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair in decimal degrees.
///
/// Shop locations are stored as `Option<GeoPoint>`: a missing location is
/// `None`, not a magic value. Legacy data used `(0,0)` to mean "not set";
/// [`GeoPoint::is_unset`] recognizes that sentinel at the boundary so it
/// never reaches distance computations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Legacy "no location" sentinel
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

/// How a buyer intends to receive a product.
///
/// Delivery reserves from the online pool; pickup and in-store buy from the
/// physical pool. Unknown values fail JSON deserialization, so an invalid
/// mode can never reach stock logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOption {
    Delivery,
    Pickup,
    InStore,
}

impl PurchaseOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOption::Delivery => "delivery",
            PurchaseOption::Pickup => "pickup",
            PurchaseOption::InStore => "in_store",
        }
    }
}

impl std::fmt::Display for PurchaseOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route plan lifecycle status.
///
/// `Active` is the only non-terminal state; a plan is never mutated after
/// creation except for this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePlanStatus {
    Active,
    Completed,
    Cancelled,
}

impl RoutePlanStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoutePlanStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePlanStatus::Active => "active",
            RoutePlanStatus::Completed => "completed",
            RoutePlanStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RoutePlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_unset() {
        assert!(GeoPoint::new(0.0, 0.0).is_unset());
        assert!(!GeoPoint::new(0.0, 0.1).is_unset());
        assert!(!GeoPoint::new(51.5, -0.12).is_unset());
    }

    #[test]
    fn purchase_option_wire_format() {
        let opt: PurchaseOption = serde_json::from_str("\"in_store\"").unwrap();
        assert_eq!(opt, PurchaseOption::InStore);
        assert!(serde_json::from_str::<PurchaseOption>("\"teleport\"").is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!RoutePlanStatus::Active.is_terminal());
        assert!(RoutePlanStatus::Completed.is_terminal());
        assert!(RoutePlanStatus::Cancelled.is_terminal());
    }
}
