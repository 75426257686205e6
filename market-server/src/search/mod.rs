//! Nearby Search
//!
//! Joins visible products to their sellers, ranks by great-circle distance
//! from the buyer and applies secondary filters. Sellers without a usable
//! location (unset, or the legacy `(0,0)` sentinel) never appear in results.

use std::collections::HashMap;

use shared::{GeoPoint, ListingMatch, ProductSnapshot, PurchaseOption, SellerSnapshot};
use shared::response::NearbyShop;

use crate::db::models::{Product, Seller};
use crate::db::repository::{ProductRepository, RepoResult, SellerRepository};
use crate::geo;

/// Secondary filters over a candidate list. Omitted filters are no-ops;
/// present ones compose as a logical AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub in_stock_only: bool,
    /// Which pool `in_stock_only` checks; delivery looks at online stock
    pub mode: Option<PurchaseOption>,
}

#[derive(Clone)]
pub struct NearbySearch {
    products: ProductRepository,
    sellers: SellerRepository,
}

impl NearbySearch {
    pub fn new(products: ProductRepository, sellers: SellerRepository) -> Self {
        Self { products, sellers }
    }

    /// Find visible products within `max_km` of the origin, sorted by
    /// ascending distance (stable on ties).
    ///
    /// The radius check uses the full-precision distance; the returned
    /// `distance_km` is rounded to 2 decimal places for display.
    pub async fn find_nearby(
        &self,
        name_filter: Option<String>,
        category_filter: Option<String>,
        origin: GeoPoint,
        max_km: f64,
    ) -> RepoResult<Vec<ListingMatch>> {
        let products = self.products.find_visible(name_filter, category_filter).await?;

        // One batched seller fetch instead of a query per product
        let mut seller_ids: Vec<String> =
            products.iter().map(|p| p.seller.to_string()).collect();
        seller_ids.sort();
        seller_ids.dedup();
        let sellers = self.sellers.find_by_ids(&seller_ids).await?;
        let sellers_by_id: HashMap<String, &Seller> = sellers
            .iter()
            .filter_map(|s| s.id.as_ref().map(|id| (id.to_string(), s)))
            .collect();

        let mut matches: Vec<(f64, ListingMatch)> = Vec::new();
        for product in &products {
            let Some(seller) = sellers_by_id.get(&product.seller.to_string()) else {
                continue;
            };
            // Missing or sentinel location: not eligible for nearby listing
            let Some(location) = seller.coordinates() else {
                continue;
            };

            let distance = geo::distance_between(&origin, &location);
            if distance <= max_km {
                matches.push((distance, build_match(seller, product, location, distance)));
            }
        }

        // Stable sort keeps scan order for equal distances
        matches.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(matches.into_iter().map(|(_, m)| m).collect())
    }

    /// Seller-level proximity search: every shop with a usable location
    /// within `max_km`, sorted by ascending distance.
    pub async fn find_nearby_shops(
        &self,
        origin: GeoPoint,
        max_km: f64,
    ) -> RepoResult<Vec<NearbyShop>> {
        let sellers = self.sellers.find_all().await?;

        let mut shops: Vec<(f64, NearbyShop)> = Vec::new();
        for seller in &sellers {
            let Some(location) = seller.coordinates() else {
                continue;
            };
            let distance = geo::distance_between(&origin, &location);
            if distance <= max_km {
                shops.push((
                    distance,
                    NearbyShop {
                        seller_id: seller.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                        shop_name: seller.shop_name.clone(),
                        shop_address: seller.shop_address.clone(),
                        shop_city: seller.shop_city.clone(),
                        location,
                        distance_km: geo::round_km(distance, 1),
                        distance_display: geo::format_distance(distance),
                    },
                ));
            }
        }

        shops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(shops.into_iter().map(|(_, s)| s).collect())
    }
}

fn build_match(
    seller: &Seller,
    product: &Product,
    location: GeoPoint,
    distance: f64,
) -> ListingMatch {
    ListingMatch {
        seller: SellerSnapshot {
            id: seller.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: seller.name.clone(),
            shop_name: seller.shop_name.clone(),
            shop_address: seller.shop_address.clone(),
            location,
        },
        product: ProductSnapshot {
            id: product.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            online_stock: product.online_stock,
            rating: product.rating,
            rating_count: product.rating_count,
        },
        distance_km: geo::round_km(distance, 2),
    }
}

/// Apply secondary filters to a candidate list.
///
/// Pure function: no storage round-trip, the snapshots carry everything the
/// filters need.
pub fn filter_results(results: Vec<ListingMatch>, filters: &SearchFilters) -> Vec<ListingMatch> {
    results
        .into_iter()
        .filter(|r| {
            if let Some(min) = filters.min_price
                && r.product.price < min
            {
                return false;
            }
            if let Some(max) = filters.max_price
                && r.product.price > max
            {
                return false;
            }
            if let Some(min) = filters.min_rating
                && r.product.rating < min
            {
                return false;
            }
            if filters.in_stock_only {
                let in_stock = match filters.mode {
                    Some(PurchaseOption::Delivery) => r.product.online_stock > 0,
                    _ => r.product.stock > 0,
                };
                if !in_stock {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(price: f64, rating: f64, stock: i64, online: i64) -> ListingMatch {
        ListingMatch {
            seller: SellerSnapshot {
                id: "seller:s1".to_string(),
                name: "Asha".to_string(),
                shop_name: None,
                shop_address: None,
                location: GeoPoint::new(12.9, 77.6),
            },
            product: ProductSnapshot {
                id: "product:p1".to_string(),
                name: "Rice 5kg".to_string(),
                category: None,
                price,
                stock,
                online_stock: online,
                rating,
                rating_count: 1,
            },
            distance_km: 1.0,
        }
    }

    #[test]
    fn no_filters_is_identity() {
        let results = vec![candidate(10.0, 4.0, 5, 2), candidate(99.0, 1.0, 0, 0)];
        let filtered = filter_results(results.clone(), &SearchFilters::default());
        assert_eq!(filtered.len(), results.len());
    }

    #[test]
    fn price_range_is_inclusive() {
        let results = vec![candidate(10.0, 4.0, 5, 2), candidate(20.0, 4.0, 5, 2)];
        let filters = SearchFilters {
            min_price: Some(10.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        let filtered = filter_results(results, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product.price, 10.0);
    }

    #[test]
    fn rating_floor() {
        let results = vec![candidate(10.0, 4.6, 5, 2), candidate(10.0, 4.4, 5, 2)];
        let filters = SearchFilters {
            min_rating: Some(4.5),
            ..Default::default()
        };
        assert_eq!(filter_results(results, &filters).len(), 1);
    }

    #[test]
    fn stock_filter_uses_mode_pool() {
        // Physically stocked but not reservable online
        let results = vec![candidate(10.0, 4.0, 5, 0)];

        let delivery = SearchFilters {
            in_stock_only: true,
            mode: Some(PurchaseOption::Delivery),
            ..Default::default()
        };
        assert!(filter_results(results.clone(), &delivery).is_empty());

        let pickup = SearchFilters {
            in_stock_only: true,
            mode: Some(PurchaseOption::Pickup),
            ..Default::default()
        };
        assert_eq!(filter_results(results, &pickup).len(), 1);
    }

    #[test]
    fn filters_compose_as_and() {
        let results = vec![
            candidate(10.0, 4.6, 5, 2),
            candidate(10.0, 4.0, 5, 2),
            candidate(50.0, 4.6, 5, 2),
        ];
        let filters = SearchFilters {
            max_price: Some(20.0),
            min_rating: Some(4.5),
            ..Default::default()
        };
        assert_eq!(filter_results(results, &filters).len(), 1);
    }
}
