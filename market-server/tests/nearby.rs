//! Nearby search integration tests

mod support;

use shared::GeoPoint;

use market_server::db::repository::{ProductRepository, SellerRepository};
use market_server::search::NearbySearch;
use support::{seed_product, seed_seller, test_db};

fn search_over(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) -> NearbySearch {
    NearbySearch::new(ProductRepository::new(db.clone()), SellerRepository::new(db.clone()))
}

#[tokio::test]
async fn excludes_sellers_without_usable_location() {
    let (_tmp, db) = test_db().await;

    let located = seed_seller(&db, "located", Some(GeoPoint::new(0.0, 0.1))).await;
    let unset = seed_seller(&db, "unset", None).await;
    // Legacy sentinel row written directly, bypassing API validation
    let sentinel = seed_seller(&db, "sentinel", Some(GeoPoint::new(0.0, 0.0))).await;

    seed_product(&db, &located, "Rice 5kg", None, 10.0, 5, 5).await;
    seed_product(&db, &unset, "Rice 5kg", None, 10.0, 5, 5).await;
    seed_product(&db, &sentinel, "Rice 5kg", None, 10.0, 5, 5).await;

    // Radius large enough to reach anything on the planet
    let results = search_over(&db)
        .find_nearby(None, None, GeoPoint::new(0.0, 0.0), 30_000.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].seller.name, "located");
}

#[tokio::test]
async fn respects_radius_and_sorts_ascending() {
    let (_tmp, db) = test_db().await;

    // ~111 km per degree of longitude at the equator
    let near = seed_seller(&db, "near", Some(GeoPoint::new(0.0, 0.05))).await;
    let mid = seed_seller(&db, "mid", Some(GeoPoint::new(0.0, 0.2))).await;
    let far = seed_seller(&db, "far", Some(GeoPoint::new(0.0, 2.0))).await;

    seed_product(&db, &mid, "Milk", None, 2.0, 5, 5).await;
    seed_product(&db, &near, "Milk", None, 2.0, 5, 5).await;
    seed_product(&db, &far, "Milk", None, 2.0, 5, 5).await;

    let results = search_over(&db)
        .find_nearby(None, None, GeoPoint::new(0.0, 0.0), 50.0)
        .await
        .unwrap();

    // far (~222 km) is outside the 50 km radius
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].seller.name, "near");
    assert_eq!(results[1].seller.name, "mid");
    assert!(results[0].distance_km <= results[1].distance_km);
    for r in &results {
        assert!(r.distance_km <= 50.0);
    }
}

#[tokio::test]
async fn name_filter_is_case_insensitive_substring() {
    let (_tmp, db) = test_db().await;

    let seller = seed_seller(&db, "asha", Some(GeoPoint::new(0.0, 0.1))).await;
    seed_product(&db, &seller, "Basmati Rice", None, 10.0, 5, 5).await;
    seed_product(&db, &seller, "Wheat Flour", None, 8.0, 5, 5).await;

    let results = search_over(&db)
        .find_nearby(Some("rice".to_string()), None, GeoPoint::new(0.0, 0.0), 100.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product.name, "Basmati Rice");
}

#[tokio::test]
async fn category_filter_is_exact() {
    let (_tmp, db) = test_db().await;

    let seller = seed_seller(&db, "asha", Some(GeoPoint::new(0.0, 0.1))).await;
    seed_product(&db, &seller, "Basmati Rice", Some("grocery"), 10.0, 5, 5).await;
    seed_product(&db, &seller, "Notebook", Some("stationery"), 3.0, 5, 5).await;

    let results = search_over(&db)
        .find_nearby(None, Some("grocery".to_string()), GeoPoint::new(0.0, 0.0), 100.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product.category.as_deref(), Some("grocery"));
}

#[tokio::test]
async fn hidden_products_never_match() {
    let (_tmp, db) = test_db().await;

    let seller = seed_seller(&db, "asha", Some(GeoPoint::new(0.0, 0.1))).await;
    let product = seed_product(&db, &seller, "Milk", None, 2.0, 5, 5).await;

    let repo = ProductRepository::new(db.clone());
    repo.update(
        &product.id.as_ref().unwrap().to_string(),
        market_server::db::models::ProductUpdate {
            name: None,
            description: None,
            category: None,
            price: None,
            is_visible: Some(false),
        },
    )
    .await
    .unwrap();

    let results = search_over(&db)
        .find_nearby(None, None, GeoPoint::new(0.0, 0.0), 100.0)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn nearby_shops_sorted_and_bounded() {
    let (_tmp, db) = test_db().await;

    seed_seller(&db, "near", Some(GeoPoint::new(0.0, 0.05))).await;
    seed_seller(&db, "far", Some(GeoPoint::new(0.0, 1.0))).await;
    seed_seller(&db, "sentinel", Some(GeoPoint::new(0.0, 0.0))).await;

    let shops = search_over(&db)
        .find_nearby_shops(GeoPoint::new(0.0, 0.0), 30.0)
        .await
        .unwrap();

    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].shop_name.as_deref(), Some("near's shop"));
    assert!(!shops[0].distance_display.is_empty());
}
