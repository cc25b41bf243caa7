use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::helpers::now;
use crate::models::id::Identifier;

pub type UserId = Identifier<User>;
pub type PostId = Identifier<Post>;

/// A follow pair: (follower, followee).
pub type FollowPair = (UserId, UserId);
/// A like pair: (user who liked, post).
pub type LikePair = (UserId, PostId);

/// User record as it arrives from a seed source, without derived fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserInitialData {
    #[serde(default = "Identifier::generate")]
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    /// URI reference, stored as given; not validated.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Post record as it arrives from a seed source, without derived fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostInitialData {
    #[serde(default = "Identifier::generate")]
    pub id: PostId,
    pub author: UserId,
    pub description: String,
    /// URI reference, stored as given; not validated.
    pub image_url: String,
    #[serde(default = "now")]
    pub created_time: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub description: String,
    pub image_url: String,
    pub created_time: DateTime<Utc>,
    pub current_user_likes_this_post: bool,
    pub liked_by_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub current_user_follows_this_user: bool,
    pub current_user_is_followed_by_this_user: bool,
    pub follows_count: usize,
    pub followed_by_count: usize,
}
