//! Review Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

use super::serde_thing;

pub type ReviewId = Thing;

/// Product review
///
/// At most one review exists per (product, author) pair: the record key is
/// derived from both, and a unique index on the fields backs that up. A
/// repeat submission overwrites rating/comment and keeps `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ReviewId>,
    /// Product reference
    #[serde(with = "serde_thing")]
    pub product: Thing,
    /// Opaque external user id of the author
    pub author: String,
    /// Integer rating in [1, 5]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    pub created_at: Option<Datetime>,
}
