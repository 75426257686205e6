//! Shared helpers for integration tests

#![allow(dead_code)]

use shared::GeoPoint;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use market_server::db::DbService;
use market_server::db::models::{Product, ProductCreate, Seller, SellerCreate};
use market_server::db::repository::{ProductRepository, SellerRepository};

/// Open a throwaway database in a tempdir. Keep the TempDir alive for the
/// duration of the test.
pub async fn test_db() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(tmp.path()).await.unwrap();
    (tmp, service.db)
}

pub async fn seed_seller(db: &Surreal<Db>, name: &str, location: Option<GeoPoint>) -> Seller {
    SellerRepository::new(db.clone())
        .create(SellerCreate {
            name: name.to_string(),
            shop_name: Some(format!("{name}'s shop")),
            shop_address: None,
            shop_city: None,
            shop_pincode: None,
            location,
        })
        .await
        .unwrap()
}

pub async fn seed_product(
    db: &Surreal<Db>,
    seller: &Seller,
    name: &str,
    category: Option<&str>,
    price: f64,
    stock: i64,
    online_stock: i64,
) -> Product {
    ProductRepository::new(db.clone())
        .create(ProductCreate {
            seller: seller.id.as_ref().unwrap().to_string(),
            name: name.to_string(),
            description: None,
            category: category.map(str::to_string),
            price,
            stock: Some(stock),
            online_stock: Some(online_stock),
        })
        .await
        .unwrap()
}

/// Record id of a stored entity as the "table:id" string
pub fn id_of(thing: &Option<surrealdb::sql::Thing>) -> String {
    thing.as_ref().unwrap().to_string()
}
