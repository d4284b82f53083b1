use crate::error::ApiError;
use crate::models::{CreatePostRequest, Post, PostCountsResponse};
use crate::store::{PostStore, UserStore};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct TrendingQuery {
    #[schema(example = 50)]
    pub likes: Option<i64>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LikesCommentsQuery {
    #[schema(example = 10)]
    pub likes: Option<i64>,
    #[schema(example = 3)]
    pub comment_count: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 404, description = "Referenced user not found")
    ),
    tag = "posts"
)]
pub async fn create_post(
    req: web::Json<CreatePostRequest>,
    posts: web::Data<PostStore>,
    users: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    // The reference is checked at creation time only; deleting the user
    // later leaves the posts in place.
    users.get(&req.username).await?;
    let post = posts.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    get,
    path = "/posts/{username}",
    params(
        ("username" = String, Path, description = "Author username")
    ),
    responses(
        (status = 200, description = "All posts by the user", body = Vec<Post>)
    ),
    tag = "posts"
)]
pub async fn posts_by_user(
    path: web::Path<String>,
    posts: web::Data<PostStore>,
) -> Result<HttpResponse, ApiError> {
    let found = posts.by_username(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    get,
    path = "/trending",
    params(
        ("likes" = Option<i64>, Query, description = "Like-count cutoff, exclusive (default: 50)")
    ),
    responses(
        (status = 200, description = "Posts with more likes than the threshold", body = Vec<Post>)
    ),
    tag = "posts"
)]
pub async fn trending_posts(
    query: web::Query<TrendingQuery>,
    posts: web::Data<PostStore>,
) -> Result<HttpResponse, ApiError> {
    let found = posts.trending(query.likes.unwrap_or(50)).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    get,
    path = "/posts/search/{keyword}",
    params(
        ("keyword" = String, Path, description = "Case-insensitive substring to match in content")
    ),
    responses(
        (status = 200, description = "Matching posts", body = Vec<Post>)
    ),
    tag = "posts"
)]
pub async fn search_posts_by_keyword(
    path: web::Path<String>,
    posts: web::Data<PostStore>,
) -> Result<HttpResponse, ApiError> {
    let found = posts.by_keyword(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    get,
    path = "/posts/search/by_likes_comments",
    params(
        ("likes" = Option<i64>, Query, description = "Exact like count"),
        ("comment_count" = Option<i64>, Query, description = "Exact comment count")
    ),
    responses(
        (status = 200, description = "Posts matching every supplied filter", body = Vec<Post>),
        (status = 400, description = "No filter supplied")
    ),
    tag = "posts"
)]
pub async fn posts_by_likes_comments(
    query: web::Query<LikesCommentsQuery>,
    posts: web::Data<PostStore>,
) -> Result<HttpResponse, ApiError> {
    let found = posts
        .by_likes_and_comments(query.likes, query.comment_count)
        .await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    get,
    path = "/users/stats/total_posts",
    responses(
        (status = 200, description = "Post count per username", body = PostCountsResponse)
    ),
    tag = "posts"
)]
pub async fn post_counts_by_user(posts: web::Data<PostStore>) -> Result<HttpResponse, ApiError> {
    let counts = posts.counts_by_user().await?;
    Ok(HttpResponse::Ok().json(PostCountsResponse { users: counts }))
}
