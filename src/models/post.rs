use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored post record. `username` references a user by value; deleting the
/// user does not delete their posts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub username: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub likes: i64,
    pub comment_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub username: String,
    pub content: String,
    /// Epoch seconds; defaults to now.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    #[schema(value_type = Option<i64>)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comment_count: i64,
}

/// One row of the posts-per-user aggregation. The store reads the grouping
/// key from `_id`; the wire exposes it as `username`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPostCount {
    #[serde(rename(deserialize = "_id"))]
    pub username: String,
    pub total_posts: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostCountsResponse {
    pub users: Vec<UserPostCount>,
}
