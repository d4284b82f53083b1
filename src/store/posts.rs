use crate::error::ApiError;
use crate::models::{CreatePostRequest, Post, UserPostCount};
use crate::services::relations;
use chrono::Utc;
use mongodb::bson::{doc, from_document, Document, Regex};
use mongodb::{Collection, Database};

/// Typed access to the `posts` collection. Likes and comment counts are
/// fixed at creation; no endpoint mutates them afterwards.
#[derive(Clone)]
pub struct PostStore {
    collection: Collection<Post>,
}

impl PostStore {
    pub fn new(db: &Database) -> Self {
        PostStore {
            collection: db.collection::<Post>("posts"),
        }
    }

    /// Inserts a post. The caller is responsible for checking that the
    /// referenced user exists; the reference is not enforced afterwards.
    pub async fn create(&self, req: CreatePostRequest) -> Result<Post, ApiError> {
        if req.likes < 0 || req.comment_count < 0 {
            return Err(ApiError::InvalidArgument(
                "likes and comment_count must not be negative".into(),
            ));
        }

        let post = Post {
            username: req.username,
            content: req.content,
            date: req.date.unwrap_or_else(Utc::now),
            likes: req.likes,
            comment_count: req.comment_count,
        };

        self.collection.insert_one(&post, None).await?;
        Ok(post)
    }

    pub async fn by_username(&self, username: &str) -> Result<Vec<Post>, ApiError> {
        let cursor = self
            .collection
            .find(doc! {"username": username}, None)
            .await?;
        collect(cursor).await
    }

    /// Posts with strictly more than `threshold` likes.
    pub async fn trending(&self, threshold: i64) -> Result<Vec<Post>, ApiError> {
        let cursor = self
            .collection
            .find(doc! {"likes": {"$gt": threshold}}, None)
            .await?;
        collect(cursor).await
    }

    /// Case-insensitive substring match against post content.
    pub async fn by_keyword(&self, keyword: &str) -> Result<Vec<Post>, ApiError> {
        let pattern = Regex {
            pattern: relations::regex_escape(keyword),
            options: "i".to_string(),
        };
        let cursor = self.collection.find(doc! {"content": pattern}, None).await?;
        collect(cursor).await
    }

    pub async fn by_likes_and_comments(
        &self,
        likes: Option<i64>,
        comment_count: Option<i64>,
    ) -> Result<Vec<Post>, ApiError> {
        let filter = likes_comments_filter(likes, comment_count)?;
        let cursor = self.collection.find(filter, None).await?;
        collect(cursor).await
    }

    /// Groups all posts by username; users with no posts do not appear.
    pub async fn counts_by_user(&self) -> Result<Vec<UserPostCount>, ApiError> {
        let pipeline = vec![doc! {
            "$group": {"_id": "$username", "total_posts": {"$sum": 1}}
        }];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        let mut counts = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            let count: UserPostCount =
                from_document(document).map_err(|e| ApiError::Internal(e.into()))?;
            counts.push(count);
        }
        Ok(counts)
    }
}

/// Builds the exact-match filter for the likes/comments search. At least one
/// of the two must be present; both present means logical AND. Zero is a
/// real filter value.
fn likes_comments_filter(
    likes: Option<i64>,
    comment_count: Option<i64>,
) -> Result<Document, ApiError> {
    if likes.is_none() && comment_count.is_none() {
        return Err(ApiError::InvalidArgument(
            "at least one of likes or comment_count is required".into(),
        ));
    }

    let mut filter = Document::new();
    if let Some(likes) = likes {
        filter.insert("likes", likes);
    }
    if let Some(comment_count) = comment_count {
        filter.insert("comment_count", comment_count);
    }
    Ok(filter)
}

async fn collect(mut cursor: mongodb::Cursor<Post>) -> Result<Vec<Post>, ApiError> {
    let mut posts = Vec::new();
    while cursor.advance().await? {
        posts.push(cursor.deserialize_current()?);
    }
    Ok(posts)
}
