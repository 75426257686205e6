//! Review Repository
//!
//! Review upsert and product-rating recomputation share one transaction, so
//! `rating`/`rating_count` never reflect a partial review set. Engine
//! conflicts (two racing reviews on the same product) are retried a bounded
//! number of times.

use super::{BaseRepository, CONFLICT_RETRIES, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::Review;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Upsert + recompute as a single transaction. The review record key is
/// derived from (product, author), which together with the unique index
/// makes a repeat submission an overwrite rather than a second row.
/// `created_at` survives the overwrite.
const UPSERT_AND_RECOMPUTE: &str = "
    BEGIN TRANSACTION;
    LET $saved = (UPSERT ONLY type::thing('review', $rid) SET
        product = type::thing('product', $pid),
        author = $author,
        rating = $rating,
        comment = $comment,
        created_at = created_at ?? time::now()
    );
    LET $stats = (SELECT math::mean(rating) AS avg, count() AS total
        FROM review WHERE product = type::thing('product', $pid) GROUP ALL);
    UPDATE type::thing('product', $pid) SET
        rating = math::round(($stats[0].avg ?? 0) * 10) / 10,
        rating_count = $stats[0].total ?? 0;
    RETURN $saved;
    COMMIT TRANSACTION;
";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Upsert a review and recompute the product's aggregate rating.
    ///
    /// Callers have already validated the rating range and product
    /// existence.
    pub async fn upsert_and_recompute(
        &self,
        product_id: &str,
        author: &str,
        rating: i64,
        comment: &str,
    ) -> RepoResult<Review> {
        let pid = strip_table_prefix("product", product_id).to_string();
        let record_key = format!("{pid}_{author}");

        let mut attempt = 0;
        loop {
            let outcome: RepoResult<Option<Review>> = async {
                let mut result = self
                    .base
                    .db()
                    .query(UPSERT_AND_RECOMPUTE)
                    .bind(("rid", record_key.clone()))
                    .bind(("pid", pid.clone()))
                    .bind(("author", author.to_string()))
                    .bind(("rating", rating))
                    .bind(("comment", comment.to_string()))
                    .await?;
                Ok(result.take(0)?)
            }
            .await;

            match outcome {
                Ok(Some(review)) => return Ok(review),
                Ok(None) => {
                    return Err(RepoError::Database(
                        "Review upsert returned no record".to_string(),
                    ));
                }
                Err(e) if e.is_transient() && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    tracing::debug!(product = %pid, attempt, "Retrying review upsert after conflict");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Reviews for a product, newest first
    pub async fn find_for_product(&self, product_id: &str, limit: usize) -> RepoResult<Vec<Review>> {
        let product = make_thing("product", product_id);
        let reviews: Vec<Review> = self
            .base
            .db()
            .query(
                "SELECT * FROM review WHERE product = $product \
                 ORDER BY created_at DESC LIMIT $limit",
            )
            .bind(("product", product))
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Count of reviews for a product
    pub async fn count_for_product(&self, product_id: &str) -> RepoResult<i64> {
        let product = make_thing("product", product_id);
        #[derive(serde::Deserialize)]
        struct Row {
            total: i64,
        }
        let rows: Vec<Row> = self
            .base
            .db()
            .query("SELECT count() AS total FROM review WHERE product = $product GROUP ALL")
            .bind(("product", product))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
