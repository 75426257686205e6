//! Product Repository
//!
//! Catalog reads plus the stock mutations. Stock moves through single
//! conditional UPDATE statements; the check and the write land atomically
//! on the record, so two racing checkouts can never drive a counter negative.

use shared::PurchaseOption;

use super::{BaseRepository, CONFLICT_RETRIES, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate, normalize_price};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all visible products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_visible = true")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find visible products, optionally narrowed by a case-insensitive
    /// substring match on the name and/or an exact category match
    pub async fn find_visible(
        &self,
        name_filter: Option<String>,
        category_filter: Option<String>,
    ) -> RepoResult<Vec<Product>> {
        let mut conditions = vec!["is_visible = true"];
        if name_filter.is_some() {
            conditions.push("string::contains(string::lowercase(name), string::lowercase($name))");
        }
        if category_filter.is_some() {
            conditions.push("category = $category");
        }
        let query_str = format!("SELECT * FROM product WHERE {}", conditions.join(" AND "));

        let mut query = self.base.db().query(query_str);
        if let Some(name) = name_filter {
            query = query.bind(("name", name));
        }
        if let Some(category) = category_filter {
            query = query.bind(("category", category));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Distinct non-null categories across visible products
    pub async fn distinct_categories(&self) -> RepoResult<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct Row {
            category: String,
        }
        let rows: Vec<Row> = self
            .base
            .db()
            .query(
                "SELECT category FROM product \
                 WHERE is_visible = true AND category != NONE \
                 GROUP BY category",
            )
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(|r| r.category).collect())
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let seller_key = strip_table_prefix("seller", &data.seller).to_string();
        let stock = data.stock.unwrap_or(0);
        // Online reservable stock can never exceed the physical pool
        let online_stock = data.online_stock.unwrap_or(0).min(stock);

        let mut result = self
            .base
            .db()
            .query(
                "CREATE product CONTENT { \
                 seller: type::thing('seller', $seller), \
                 name: $name, \
                 description: $description, \
                 category: $category, \
                 price: $price, \
                 stock: $stock, \
                 online_stock: $online_stock, \
                 is_visible: true, \
                 rating: 0.0, \
                 rating_count: 0 \
                 }",
            )
            .bind(("seller", seller_key))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("category", data.category))
            .bind(("price", normalize_price(data.price)))
            .bind(("stock", stock))
            .bind(("online_stock", online_stock))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update catalog fields of a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing = make_thing(PRODUCT_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.is_visible.is_some() {
            set_parts.push("is_visible = $is_visible");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")));
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(query_str).bind(("thing", thing));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", normalize_price(v)));
        }
        if let Some(v) = data.is_visible {
            query = query.bind(("is_visible", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Atomically decrement stock for a sale.
    ///
    /// Delivery consumes from both pools (a delivery sale also leaves the
    /// shelf); pickup and in-store consume from the physical pool, clamping
    /// the online pool so `online_stock <= stock` survives the sale. The
    /// guard and the subtraction are one statement, so either the whole
    /// decrement applies or nothing does. Returns the updated product, or
    /// `None` when stock was insufficient.
    pub async fn decrement_stock(
        &self,
        id: &str,
        quantity: i64,
        mode: PurchaseOption,
    ) -> RepoResult<Option<Product>> {
        let thing = make_thing(PRODUCT_TABLE, id);

        let query_str = match mode {
            PurchaseOption::Delivery => {
                "UPDATE $thing SET online_stock -= $qty, stock -= $qty \
                 WHERE online_stock >= $qty AND stock >= $qty RETURN AFTER"
            }
            PurchaseOption::Pickup | PurchaseOption::InStore => {
                "UPDATE $thing SET online_stock = math::min([online_stock, stock - $qty]), \
                 stock -= $qty WHERE stock >= $qty RETURN AFTER"
            }
        };

        let mut attempt = 0;
        loop {
            let outcome: RepoResult<Vec<Product>> = async {
                let mut result = self
                    .base
                    .db()
                    .query(query_str)
                    .bind(("thing", thing.clone()))
                    .bind(("qty", quantity))
                    .await?;
                Ok(result.take(0)?)
            }
            .await;

            match outcome {
                Ok(products) => return Ok(products.into_iter().next()),
                Err(e) if e.is_transient() && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    tracing::debug!(product = %thing, attempt, "Retrying stock decrement after conflict");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Administrative stock reset. Clamps the online pool to the physical
    /// pool so `online_stock <= stock` holds by construction.
    pub async fn reset_stock(
        &self,
        id: &str,
        total_stock: i64,
        online_stock: i64,
    ) -> RepoResult<Product> {
        let thing = make_thing(PRODUCT_TABLE, id);
        let online = online_stock.min(total_stock);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET stock = $stock, online_stock = $online RETURN AFTER")
            .bind(("thing", thing))
            .bind(("stock", total_stock))
            .bind(("online", online))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }
}
