//! Seller Repository

use shared::GeoPoint;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Seller, SellerCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SELLER_TABLE: &str = "seller";

#[derive(Clone)]
pub struct SellerRepository {
    base: BaseRepository,
}

impl SellerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new seller profile
    pub async fn create(&self, data: SellerCreate) -> RepoResult<Seller> {
        let seller = Seller {
            id: None,
            name: data.name,
            shop_name: data.shop_name,
            shop_address: data.shop_address,
            shop_city: data.shop_city,
            shop_pincode: data.shop_pincode,
            location: data.location,
        };

        let created: Option<Seller> = self.base.db().create(SELLER_TABLE).content(seller).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create seller".to_string()))
    }

    /// Find seller by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Seller>> {
        let pure_id = strip_table_prefix(SELLER_TABLE, id);
        let seller: Option<Seller> = self.base.db().select((SELLER_TABLE, pure_id)).await?;
        Ok(seller)
    }

    /// Find all sellers
    pub async fn find_all(&self) -> RepoResult<Vec<Seller>> {
        let sellers: Vec<Seller> = self.base.db().select(SELLER_TABLE).await?;
        Ok(sellers)
    }

    /// Batch fetch sellers by id, in no particular order
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Seller>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let things: Vec<surrealdb::sql::Thing> =
            ids.iter().map(|id| make_thing(SELLER_TABLE, id)).collect();
        let sellers: Vec<Seller> = self
            .base
            .db()
            .query("SELECT * FROM seller WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(sellers)
    }

    /// Update a seller's shop profile and location.
    ///
    /// Callers validate coordinates; `None` clears the location.
    pub async fn update_shop_location(
        &self,
        id: &str,
        shop_name: Option<String>,
        shop_address: Option<String>,
        shop_city: Option<String>,
        shop_pincode: Option<String>,
        location: Option<GeoPoint>,
    ) -> RepoResult<Seller> {
        let thing = make_thing(SELLER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $seller SET \
                 shop_name = $shop_name, \
                 shop_address = $shop_address, \
                 shop_city = $shop_city, \
                 shop_pincode = $shop_pincode, \
                 location = $location \
                 RETURN AFTER",
            )
            .bind(("seller", thing))
            .bind(("shop_name", shop_name))
            .bind(("shop_address", shop_address))
            .bind(("shop_city", shop_city))
            .bind(("shop_pincode", shop_pincode))
            .bind(("location", location))
            .await?;
        let sellers: Vec<Seller> = result.take(0)?;
        sellers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Seller {id} not found")))
    }
}
