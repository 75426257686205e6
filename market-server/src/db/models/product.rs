//! Product Model

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type ProductId = Thing;

/// Product entity
///
/// Carries two independent stock counters: `stock` is the physical pool,
/// `online_stock` the portion reservable for delivery. Invariant:
/// `online_stock <= stock`. `rating`/`rating_count` are derived from reviews
/// and never written by catalog payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    /// Seller reference
    #[serde(with = "serde_thing")]
    pub seller: Thing,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Unit price, normalized to 2 decimal places on write
    pub price: f64,
    /// Total physical stock
    #[serde(default)]
    pub stock: i64,
    /// Stock reservable for delivery orders
    #[serde(default)]
    pub online_stock: i64,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Mean review rating, 0.0 when unreviewed, 1 decimal place
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: i64,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    /// Seller id ("seller:xyz")
    pub seller: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub stock: Option<i64>,
    pub online_stock: Option<i64>,
}

/// Update product payload
///
/// Stock counters and ratings are intentionally absent: stock moves through
/// the inventory operations and ratings through reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub is_visible: Option<bool>,
}

/// Normalize a price to 2 decimal places (half-up), the precision stored
/// and compared everywhere.
pub fn normalize_price(price: f64) -> f64 {
    Decimal::from_f64(price)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
