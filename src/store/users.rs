use crate::error::ApiError;
use crate::models::{CreateUserRequest, User};
use crate::services::relations;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Bson, Regex};
use mongodb::{Collection, Database};

/// Typed access to the `users` collection. Owns every friend-list mutation;
/// `friends_count` is always derived from the list here, never trusted from
/// input.
#[derive(Clone)]
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    pub fn new(db: &Database) -> Self {
        UserStore {
            collection: db.collection::<User>("users"),
        }
    }

    pub async fn create(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        relations::validate_email(&req.email)?;
        relations::validate_friend_list(&req.username, &req.friends)?;

        if self.find(&req.username).await?.is_some() {
            return Err(ApiError::AlreadyExists(format!("user {}", req.username)));
        }

        let user = User {
            username: req.username,
            full_name: req.full_name,
            active: req.active,
            email: req.email,
            created_on: req.created_on.unwrap_or_else(Utc::now),
            friends_count: req.friends.len() as i64,
            friends: req.friends,
        };

        self.collection.insert_one(&user, None).await?;
        Ok(user)
    }

    pub async fn all(&self) -> Result<Vec<User>, ApiError> {
        let cursor = self.collection.find(None, None).await?;
        collect(cursor).await
    }

    pub async fn find(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = self
            .collection
            .find_one(doc! {"username": username}, None)
            .await?;
        Ok(user)
    }

    /// Like [`find`](Self::find), but absence is a `NotFound` error.
    pub async fn get(&self, username: &str) -> Result<User, ApiError> {
        self.find(username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {}", username)))
    }

    pub async fn update_email(&self, username: &str, new_email: &str) -> Result<(), ApiError> {
        relations::validate_email(new_email)?;

        let result = self
            .collection
            .update_one(
                doc! {"username": username},
                doc! {"$set": {"email": new_email}},
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(format!("user {}", username)));
        }
        Ok(())
    }

    /// Records a mutual friend edge: both users gain the other in their
    /// friend list, both counters are recomputed. The two document writes
    /// are not transactional; the store only guarantees per-document
    /// atomicity.
    pub async fn add_friend(&self, username: &str, friend_username: &str) -> Result<(), ApiError> {
        if username == friend_username {
            return Err(ApiError::InvalidArgument(format!(
                "user {} cannot befriend themselves",
                username
            )));
        }

        let user = self.get(username).await?;
        let friend = self.get(friend_username).await?;

        if user.friends.iter().any(|f| f == friend_username) {
            return Err(ApiError::AlreadyFriends);
        }

        self.push_friend(username, friend_username, user.friends.len() as i64 + 1)
            .await?;

        // The reciprocal entry may already exist if an earlier mutual write
        // was interrupted halfway.
        if !friend.friends.iter().any(|f| f == username) {
            self.push_friend(friend_username, username, friend.friends.len() as i64 + 1)
                .await?;
        }
        Ok(())
    }

    async fn push_friend(
        &self,
        username: &str,
        friend_username: &str,
        new_count: i64,
    ) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! {"username": username},
                doc! {
                    "$push": {"friends": friend_username},
                    "$set": {"friends_count": new_count},
                },
                None,
            )
            .await?;
        Ok(())
    }

    /// Deletes the user and strips them from every other friend list, then
    /// recomputes the affected counters from the list length.
    pub async fn delete(&self, username: &str) -> Result<(), ApiError> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! {"username": username}, None)
            .await?;

        if deleted.is_none() {
            return Err(ApiError::NotFound(format!("user {}", username)));
        }

        self.collection
            .update_many(
                doc! {"friends": username},
                doc! {"$pull": {"friends": username}},
                None,
            )
            .await?;

        self.collection
            .update_many(
                doc! {},
                vec![doc! {"$set": {"friends_count": {"$size": "$friends"}}}],
                None,
            )
            .await?;
        Ok(())
    }

    /// Users with strictly more than `threshold` friends.
    pub async fn popular(&self, threshold: i64) -> Result<Vec<User>, ApiError> {
        let cursor = self
            .collection
            .find(doc! {"friends_count": {"$gt": threshold}}, None)
            .await?;
        collect(cursor).await
    }

    pub async fn online_count(&self) -> Result<u64, ApiError> {
        let count = self
            .collection
            .count_documents(doc! {"active": true}, None)
            .await?;
        Ok(count)
    }

    /// Users created strictly after the given instant.
    pub async fn created_after(&self, after: DateTime<Utc>) -> Result<Vec<User>, ApiError> {
        let cursor = self
            .collection
            .find(doc! {"created_on": {"$gt": after.timestamp()}}, None)
            .await?;
        collect(cursor).await
    }

    /// Users whose email ends in `@domain`, case-insensitively (the strict
    /// variant of the domain search).
    pub async fn by_email_domain(&self, domain: &str) -> Result<Vec<User>, ApiError> {
        if domain.is_empty() {
            return Err(ApiError::InvalidArgument("domain must not be empty".into()));
        }

        let pattern = Regex {
            pattern: relations::email_domain_pattern(domain),
            options: "i".to_string(),
        };
        let cursor = self.collection.find(doc! {"email": pattern}, None).await?;
        collect(cursor).await
    }

    /// Pairwise mutual friends: the intersection of the two users' friend
    /// lists. Pure read, no mutation.
    pub async fn mutual_friends(&self, a: &str, b: &str) -> Result<Vec<String>, ApiError> {
        let user_a = self.get(a).await?;
        let user_b = self.get(b).await?;
        Ok(relations::mutual_friends(&user_a.friends, &user_b.friends))
    }

    /// Broader reachability variant: every other user sharing at least one
    /// friend with the given user.
    pub async fn with_mutual_friends(&self, username: &str) -> Result<Vec<String>, ApiError> {
        let user = self.get(username).await?;

        let values = self
            .collection
            .distinct(
                "username",
                doc! {"friends": {"$in": user.friends.clone()}},
                None,
            )
            .await?;

        let usernames = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(name) if name != username => Some(name),
                _ => None,
            })
            .collect();
        Ok(usernames)
    }
}

async fn collect(mut cursor: mongodb::Cursor<User>) -> Result<Vec<User>, ApiError> {
    let mut users = Vec::new();
    while cursor.advance().await? {
        users.push(cursor.deserialize_current()?);
    }
    Ok(users)
}
