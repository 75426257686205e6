//! Review API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::request::ReviewSubmit;

use crate::core::ServerState;
use crate::db::models::Review;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_rating, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const DEFAULT_REVIEW_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub limit: Option<usize>,
}

/// GET /api/products/:id/reviews?limit=.. - newest first
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let limit = query.limit.unwrap_or(DEFAULT_REVIEW_LIMIT).clamp(1, 100);
    let reviews = state.review_repository().find_for_product(&id, limit).await?;
    Ok(Json(reviews))
}

/// POST /api/products/:id/reviews - add or overwrite the author's review
///
/// A second submission by the same author replaces the earlier rating and
/// comment; the product's aggregate rating follows in the same transaction.
pub async fn add(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewSubmit>,
) -> AppResult<Json<Review>> {
    validate_required_text(&payload.author, "author", MAX_SHORT_TEXT_LEN)?;
    validate_rating(payload.rating)?;
    if payload.comment.len() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "comment is too long ({} chars, max {MAX_TEXT_LEN})",
            payload.comment.len()
        )));
    }

    // Reviews only attach to known products
    if state.product_repository().find_by_id(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Product {id}")));
    }

    let review = state
        .review_repository()
        .upsert_and_recompute(&id, &payload.author, payload.rating, &payload.comment)
        .await?;
    Ok(Json(review))
}
