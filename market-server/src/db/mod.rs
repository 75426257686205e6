//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) connection and schema definition

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "market";
const DATABASE: &str = "market";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `db_dir` and apply the schema
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready (SurrealDB/RocksDB at {})", db_dir.display());

        Ok(Self { db })
    }
}

/// Table and index definitions, applied at startup.
///
/// The unique review index is load-bearing: it backs the one-review-per-
/// (product, author) invariant even if a write path bypasses the
/// deterministic record key.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const SCHEMA: &str = "
        DEFINE TABLE IF NOT EXISTS seller SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS review SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS route_plan SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS route_plan_stop SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_review_product_author ON review FIELDS product, author UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_stop_plan ON route_plan_stop FIELDS plan;
        DEFINE INDEX IF NOT EXISTS idx_product_seller ON product FIELDS seller;
    ";

    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::Database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::Database(format!("Schema definition rejected: {e}")))?;

    Ok(())
}
