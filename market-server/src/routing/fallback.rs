//! Nearest-neighbor fallback
//!
//! Deterministic greedy ordering used when the optimizer is unavailable:
//! from the current position, always visit the closest remaining stop.
//! Ties keep the first-encountered input order, which makes the heuristic
//! reproducible under test.

use shared::{GeoPoint, ListingMatch};

use crate::geo;

/// Order the shopping list by repeated nearest-neighbor selection from
/// `origin`. Returns indices into `items` in visiting order.
pub fn nearest_neighbor_order(origin: GeoPoint, items: &[ListingMatch]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..items.len()).collect();
    let mut order = Vec::with_capacity(items.len());
    let mut current = origin;

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_distance = f64::INFINITY;
        for (pos, &idx) in remaining.iter().enumerate() {
            let d = geo::distance_between(&current, &items[idx].seller.location);
            // Strict less-than keeps the earliest index on ties
            if d < best_distance {
                best_distance = d;
                best_pos = pos;
            }
        }

        let chosen = remaining.remove(best_pos);
        current = items[chosen].seller.location;
        order.push(chosen);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ProductSnapshot, SellerSnapshot};

    fn item(lat: f64, lng: f64) -> ListingMatch {
        ListingMatch {
            seller: SellerSnapshot {
                id: format!("seller:{lat}_{lng}"),
                name: "shop".to_string(),
                shop_name: None,
                shop_address: None,
                location: GeoPoint::new(lat, lng),
            },
            product: ProductSnapshot {
                id: "product:p".to_string(),
                name: "item".to_string(),
                category: None,
                price: 1.0,
                stock: 1,
                online_stock: 1,
                rating: 0.0,
                rating_count: 0,
            },
            distance_km: 0.0,
        }
    }

    #[test]
    fn visits_closest_first() {
        // Stops at 1 and 2 degrees north of the origin
        let items = vec![item(0.0, 2.0), item(0.0, 1.0)];
        let order = nearest_neighbor_order(GeoPoint::new(0.0, 0.0), &items);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn advances_from_each_visited_stop() {
        // Greedy from (0,0): nearest is (0,1); from there (0,2) beats (5,0)
        let items = vec![item(5.0, 0.0), item(0.0, 2.0), item(0.0, 1.0)];
        let order = nearest_neighbor_order(GeoPoint::new(0.0, 0.0), &items);
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        // Two stops at the same location
        let items = vec![item(0.0, 1.0), item(0.0, 1.0), item(0.0, 3.0)];
        let order = nearest_neighbor_order(GeoPoint::new(0.0, 0.0), &items);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn empty_list_yields_empty_order() {
        assert!(nearest_neighbor_order(GeoPoint::new(0.0, 0.0), &[]).is_empty());
    }
}
