use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored user record. Field names are stable wire/storage keys; `username`
/// is the collection key and never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub active: bool,
    pub email: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_on: DateTime<Utc>,
    pub friends: Vec<String>,
    pub friends_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub active: bool,
    pub email: String,
    /// Epoch seconds; defaults to now.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    #[schema(value_type = Option<i64>)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub friends: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmailQuery {
    pub new_email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFriendQuery {
    pub friend_username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutualFriendsResponse {
    pub mutual_friends: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersWithMutualFriendsResponse {
    pub users_with_mutual_friends: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnlineUsersCountResponse {
    pub online_users_count: u64,
}
