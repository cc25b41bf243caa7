//! In-memory users, posts, likes and follows, seen from a single current user.
//!
//! [`posts::PostsStorage`] owns posts and the like relation, [`users::UsersStorage`]
//! owns users and the follow relation. Derived counters and relative flags on the
//! returned [`Post`] and [`User`] values are always computed from those relations.

pub mod commands;
pub mod config;
pub mod core;
pub mod follow;
pub mod models;
pub mod posts;
pub mod users;

pub use crate::commands::{dispatch, Session};
pub use crate::core::db::SeedData;
pub use crate::core::errors::StoreError;
pub use crate::core::relation::Relation;
pub use crate::core::shared::Shared;
pub use crate::models::id::Identifier;
pub use crate::models::models::{
    FollowPair, LikePair, Post, PostId, PostInitialData, User, UserId, UserInitialData,
};
pub use crate::posts::PostsStorage;
pub use crate::users::UsersStorage;
