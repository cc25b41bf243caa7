use std::collections::HashMap;

use crate::core::helpers::matches_prefix;
use crate::core::relation::Relation;
use crate::models::models::{LikePair, Post, PostId, PostInitialData, UserId};

/// Posts plus the like relation, seen from one current user.
///
/// Like counts and the "current user likes this" flag are not stored on the records;
/// every returned [`Post`] is materialized from the like relation at read time.
#[derive(Clone, Debug)]
pub struct PostsStorage {
    posts: Vec<PostInitialData>,
    index: HashMap<PostId, usize>,
    likes: Relation<UserId, PostId>,
    current_user_id: UserId,
}

impl PostsStorage {
    /// Builds the store. Never fails: the current user is not checked against authors.
    pub fn new(
        posts: Vec<PostInitialData>,
        likes: Vec<LikePair>,
        current_user_id: UserId,
    ) -> Self {
        let mut index = HashMap::with_capacity(posts.len());
        for (pos, post) in posts.iter().enumerate() {
            // first occurrence wins for duplicate ids
            index.entry(post.id.clone()).or_insert(pos);
        }

        let likes: Relation<UserId, PostId> = likes.into_iter().collect();
        for (user, post) in likes.iter() {
            if !index.contains_key(post) {
                tracing::warn!(%user, %post, "like references an unknown post");
            }
        }

        tracing::debug!(posts = posts.len(), likes = likes.len(), "posts storage ready");
        Self {
            posts,
            index,
            likes,
            current_user_id,
        }
    }

    pub fn count(&self) -> usize {
        self.posts.len()
    }

    pub fn current_user_id(&self) -> &UserId {
        &self.current_user_id
    }

    pub fn post(&self, post_id: &PostId) -> Option<Post> {
        self.index.get(post_id).map(|&pos| self.view(&self.posts[pos]))
    }

    /// Every post in input order.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.iter().map(|p| self.view(p)).collect()
    }

    pub fn find_posts_by_author(&self, author_id: &UserId) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| &p.author == author_id)
            .map(|p| self.view(p))
            .collect()
    }

    /// Posts whose description starts with `search`.
    pub fn find_posts_by_text(&self, search: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| matches_prefix(&p.description, search))
            .map(|p| self.view(p))
            .collect()
    }

    /// Likes the post as the current user.
    ///
    /// Returns false only when no such post exists; liking an already liked post
    /// succeeds without changing anything.
    pub fn like_post(&mut self, post_id: &PostId) -> bool {
        if !self.index.contains_key(post_id) {
            return false;
        }
        if self.likes.insert(self.current_user_id.clone(), post_id.clone()) {
            tracing::debug!(user = %self.current_user_id, post = %post_id, "post liked");
        }
        true
    }

    /// Removes the current user's like. Returns false only when no such post exists.
    pub fn unlike_post(&mut self, post_id: &PostId) -> bool {
        if !self.index.contains_key(post_id) {
            return false;
        }
        if self.likes.remove(&self.current_user_id, post_id) {
            tracing::debug!(user = %self.current_user_id, post = %post_id, "post unliked");
        }
        true
    }

    /// Users who liked the post, in the order the likes were recorded.
    ///
    /// `None` when the post does not exist, an empty list when nobody liked it.
    pub fn users_liked_post(&self, post_id: &PostId) -> Option<Vec<UserId>> {
        if !self.index.contains_key(post_id) {
            return None;
        }
        Some(self.likes.lefts_of(post_id).to_vec())
    }

    fn view(&self, record: &PostInitialData) -> Post {
        Post {
            id: record.id.clone(),
            author: record.author.clone(),
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            created_time: record.created_time,
            current_user_likes_this_post: self.likes.contains(&self.current_user_id, &record.id),
            liked_by_count: self.likes.count_lefts_of(&record.id),
        }
    }
}
