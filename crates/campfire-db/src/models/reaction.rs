use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub reaction_type: String,
    pub count: i64,
}

/// Reaction count per post and type (from query)
#[derive(Debug, Clone, FromRow)]
pub struct PostReactionCountModel {
    pub post_id: i64,
    pub reaction_type: String,
    pub count: i64,
}
