mod post;
mod user;

pub use post::{CreatePostRequest, Post, PostCountsResponse, UserPostCount};
pub use user::{
    AddFriendQuery, CreateUserRequest, MutualFriendsResponse, OnlineUsersCountResponse,
    UpdateEmailQuery, User, UsersWithMutualFriendsResponse,
};
