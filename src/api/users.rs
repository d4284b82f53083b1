use crate::error::ApiError;
use crate::models::{
    AddFriendQuery, CreateUserRequest, MutualFriendsResponse, OnlineUsersCountResponse,
    UpdateEmailQuery, User, UsersWithMutualFriendsResponse,
};
use crate::store::UserStore;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ThresholdQuery {
    #[schema(example = 100)]
    pub threshold: Option<i64>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DateQuery {
    #[schema(example = "2023-01-01T00:00:00")]
    pub date: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DomainQuery {
    #[schema(example = "example.com")]
    pub domain: String,
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Username taken or invalid payload")
    ),
    tag = "users"
)]
pub async fn create_user(
    req: web::Json<CreateUserRequest>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let user = store.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn get_users(store: web::Data<UserStore>) -> Result<HttpResponse, ApiError> {
    let users = store.all().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{username}",
    params(
        ("username" = String, Path, description = "Username to look up")
    ),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    path: web::Path<String>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let user = store.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    put,
    path = "/users/{username}/email",
    params(
        ("username" = String, Path, description = "User to update"),
        ("new_email" = String, Query, description = "Replacement email address")
    ),
    responses(
        (status = 200, description = "Email updated"),
        (status = 400, description = "Malformed email address"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_email(
    path: web::Path<String>,
    query: web::Query<UpdateEmailQuery>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    store.update_email(&path.into_inner(), &query.new_email).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "email updated"})))
}

#[utoipa::path(
    put,
    path = "/users/{username}/add_friend",
    params(
        ("username" = String, Path, description = "User gaining a friend"),
        ("friend_username" = String, Query, description = "Friend to add")
    ),
    responses(
        (status = 200, description = "Friend added on both sides"),
        (status = 400, description = "Already friends or self-reference"),
        (status = 404, description = "Either user not found")
    ),
    tag = "users"
)]
pub async fn add_friend(
    path: web::Path<String>,
    query: web::Query<AddFriendQuery>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    store
        .add_friend(&path.into_inner(), &query.friend_username)
        .await?;
    Ok(HttpResponse::Ok().json(json!({"message": "friend added"})))
}

#[utoipa::path(
    delete,
    path = "/users/{username}",
    params(
        ("username" = String, Path, description = "User to delete")
    ),
    responses(
        (status = 200, description = "User deleted, friend lists cleaned up"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    path: web::Path<String>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    store.delete(&username).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("user {} deleted", username)
    })))
}

#[utoipa::path(
    get,
    path = "/popusers",
    params(
        ("threshold" = Option<i64>, Query, description = "Friend-count cutoff, exclusive (default: 100)")
    ),
    responses(
        (status = 200, description = "Users with more friends than the threshold", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn popular_users(
    query: web::Query<ThresholdQuery>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let users = store.popular(query.threshold.unwrap_or(100)).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/online_users_count",
    responses(
        (status = 200, description = "Count of active users", body = OnlineUsersCountResponse)
    ),
    tag = "users"
)]
pub async fn online_users_count(store: web::Data<UserStore>) -> Result<HttpResponse, ApiError> {
    let count = store.online_count().await?;
    Ok(HttpResponse::Ok().json(OnlineUsersCountResponse {
        online_users_count: count,
    }))
}

#[utoipa::path(
    get,
    path = "/users/find/by_date",
    params(
        ("date" = String, Query, description = "ISO date or date-time; users created strictly after it are returned")
    ),
    responses(
        (status = 200, description = "Users created after the given instant", body = Vec<User>),
        (status = 400, description = "Unparseable date")
    ),
    tag = "users"
)]
pub async fn users_by_date(
    query: web::Query<DateQuery>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let after = parse_after_date(&query.date)?;
    let users = store.created_after(after).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/search/by_email_domain",
    params(
        ("domain" = String, Query, description = "Email domain, matched as a case-insensitive suffix")
    ),
    responses(
        (status = 200, description = "Users whose email ends in @domain", body = Vec<User>),
        (status = 400, description = "Empty domain")
    ),
    tag = "users"
)]
pub async fn users_by_email_domain(
    query: web::Query<DomainQuery>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let users = store.by_email_domain(&query.domain).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{username}/mutual_friends",
    params(
        ("username" = String, Path, description = "User whose friend graph is searched")
    ),
    responses(
        (status = 200, description = "Other users sharing at least one friend", body = UsersWithMutualFriendsResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn users_with_mutual_friends(
    path: web::Path<String>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let usernames = store.with_mutual_friends(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UsersWithMutualFriendsResponse {
        users_with_mutual_friends: usernames,
    }))
}

#[utoipa::path(
    get,
    path = "/users/{username}/mutual_friends/{other}",
    params(
        ("username" = String, Path, description = "First user"),
        ("other" = String, Path, description = "Second user")
    ),
    responses(
        (status = 200, description = "Intersection of the two friend lists", body = MutualFriendsResponse),
        (status = 404, description = "Either user not found")
    ),
    tag = "users"
)]
pub async fn mutual_friends(
    path: web::Path<(String, String)>,
    store: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let (username, other) = path.into_inner();
    let friends = store.mutual_friends(&username, &other).await?;
    Ok(HttpResponse::Ok().json(MutualFriendsResponse {
        mutual_friends: friends,
    }))
}

/// Accepts RFC 3339, a bare ISO date-time, or a bare date.
fn parse_after_date(value: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(ApiError::InvalidArgument(format!(
        "unparseable date: {}",
        value
    )))
}
