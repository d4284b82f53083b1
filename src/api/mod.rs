pub mod posts;
pub mod users;

use crate::models::{
    AddFriendQuery, CreatePostRequest, CreateUserRequest, MutualFriendsResponse,
    OnlineUsersCountResponse, Post, PostCountsResponse, UpdateEmailQuery, User, UserPostCount,
    UsersWithMutualFriendsResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // User endpoints
        users::create_user,
        users::get_users,
        users::get_user,
        users::update_email,
        users::add_friend,
        users::delete_user,
        users::popular_users,
        users::online_users_count,
        users::users_by_date,
        users::users_by_email_domain,
        users::users_with_mutual_friends,
        users::mutual_friends,
        // Post endpoints
        posts::create_post,
        posts::posts_by_user,
        posts::trending_posts,
        posts::search_posts_by_keyword,
        posts::posts_by_likes_comments,
        posts::post_counts_by_user,
    ),
    components(schemas(
        // User schemas
        User,
        CreateUserRequest,
        UpdateEmailQuery,
        AddFriendQuery,
        MutualFriendsResponse,
        UsersWithMutualFriendsResponse,
        OnlineUsersCountResponse,
        // Post schemas
        Post,
        CreatePostRequest,
        UserPostCount,
        PostCountsResponse,
        // Query schemas
        users::ThresholdQuery,
        users::DateQuery,
        users::DomainQuery,
        posts::TrendingQuery,
        posts::LikesCommentsQuery,
    )),
    tags(
        (name = "users", description = "User and friend-graph endpoints"),
        (name = "posts", description = "Post and aggregation endpoints"),
    )
)]
pub struct ApiDoc;
