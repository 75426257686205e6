//! Repository Module
//!
//! CRUD and transactional operations per table. All SurrealQL lives here;
//! services and handlers never build queries themselves.

// Catalog
pub mod product;
pub mod seller;

// Reviews
pub mod review;

// Routing
pub mod route_plan;

// Re-exports
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use route_plan::RoutePlanRepository;
pub use seller::SellerRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Optimistic transactions on the embedded engine surface write-write
        // races as conflict errors; callers retry those.
        if msg.to_lowercase().contains("conflict") {
            RepoError::Conflict(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl RepoError {
    /// Whether a bounded retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, RepoError::Conflict(_))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// How many times transactional writes retry on engine conflicts before
/// surfacing the conflict to the caller
pub const CONFLICT_RETRIES: usize = 3;

// =============================================================================
// ID Convention: ids travel as "table:id" strings end to end
// =============================================================================

/// Strip a `"table:"` prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a Thing from a table name and an id with or without prefix
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
