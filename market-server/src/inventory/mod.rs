//! Inventory
//!
//! Stock availability checks and atomic decrement across the two stock
//! pools. Delivery sells from the online-reservable pool (and the shared
//! physical pool underneath it); pickup and in-store sell from the physical
//! pool. Unknown products fail closed.

use shared::PurchaseOption;
use shared::response::AvailabilityResponse;

use crate::db::models::Product;
use crate::db::repository::{ProductRepository, RepoResult};

/// Which stock pool a purchase mode draws availability from
fn available_for(product: &Product, mode: PurchaseOption) -> i64 {
    match mode {
        PurchaseOption::Delivery => product.online_stock,
        PurchaseOption::Pickup | PurchaseOption::InStore => product.stock,
    }
}

/// Pure availability decision over a loaded product
pub fn check_product_availability(
    product: &Product,
    quantity: i64,
    mode: PurchaseOption,
) -> AvailabilityResponse {
    let available = available_for(product, mode);
    if available >= quantity {
        AvailabilityResponse {
            available: true,
            reason: match mode {
                PurchaseOption::Delivery => "Available for delivery".to_string(),
                other => format!("Available for {other}"),
            },
        }
    } else {
        AvailabilityResponse {
            available: false,
            reason: match mode {
                PurchaseOption::Delivery => {
                    format!("Only {available} available for delivery")
                }
                _ => format!("Only {available} available in store"),
            },
        }
    }
}

/// Inventory operations over the product store
#[derive(Clone)]
pub struct InventoryService {
    products: ProductRepository,
}

/// Outcome of a decrement attempt
#[derive(Debug)]
pub enum DecrementOutcome {
    /// Stock was taken; carries the updated product
    Applied(Product),
    /// The product exists but the pool could not cover the quantity
    InsufficientStock { available: i64 },
    ProductNotFound,
}

impl InventoryService {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Check whether `quantity` of a product can be bought under `mode`.
    ///
    /// Fails closed: an unknown product reports unavailable.
    pub async fn check_availability(
        &self,
        product_id: &str,
        quantity: i64,
        mode: PurchaseOption,
    ) -> RepoResult<AvailabilityResponse> {
        match self.products.find_by_id(product_id).await? {
            Some(product) => Ok(check_product_availability(&product, quantity, mode)),
            None => Ok(AvailabilityResponse {
                available: false,
                reason: "Product not found".to_string(),
            }),
        }
    }

    /// Take `quantity` out of stock, all or nothing.
    ///
    /// The repository runs the guard and the subtraction as one atomic
    /// statement, so concurrent sales can never oversell a pool.
    pub async fn decrement_stock(
        &self,
        product_id: &str,
        quantity: i64,
        mode: PurchaseOption,
    ) -> RepoResult<DecrementOutcome> {
        if let Some(product) = self.products.decrement_stock(product_id, quantity, mode).await? {
            return Ok(DecrementOutcome::Applied(product));
        }

        // Guard failed; report why
        match self.products.find_by_id(product_id).await? {
            Some(product) => Ok(DecrementOutcome::InsufficientStock {
                available: available_for(&product, mode),
            }),
            None => Ok(DecrementOutcome::ProductNotFound),
        }
    }

    /// Administrative stock reset; the online pool is clamped to the
    /// physical pool.
    pub async fn update_inventory(
        &self,
        product_id: &str,
        total_stock: i64,
        online_stock: i64,
    ) -> RepoResult<Product> {
        self.products
            .reset_stock(product_id, total_stock, online_stock)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::sql::Thing;

    fn product(stock: i64, online_stock: i64) -> Product {
        Product {
            id: None,
            seller: Thing::from(("seller", "s1")),
            name: "Rice 5kg".to_string(),
            description: None,
            category: Some("grocery".to_string()),
            price: 12.5,
            stock,
            online_stock,
            is_visible: true,
            rating: 0.0,
            rating_count: 0,
        }
    }

    #[test]
    fn delivery_checks_online_pool() {
        let p = product(10, 2);
        assert!(!check_product_availability(&p, 3, PurchaseOption::Delivery).available);
        assert!(check_product_availability(&p, 2, PurchaseOption::Delivery).available);
    }

    #[test]
    fn pickup_checks_physical_pool() {
        let p = product(10, 2);
        assert!(check_product_availability(&p, 10, PurchaseOption::Pickup).available);
        assert!(!check_product_availability(&p, 11, PurchaseOption::InStore).available);
    }

    #[test]
    fn insufficient_reason_names_the_pool() {
        let p = product(10, 2);
        let resp = check_product_availability(&p, 5, PurchaseOption::Delivery);
        assert_eq!(resp.reason, "Only 2 available for delivery");
        let resp = check_product_availability(&p, 20, PurchaseOption::Pickup);
        assert_eq!(resp.reason, "Only 10 available in store");
    }
}
