use std::path::Path;

use anyhow::Context;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

use crate::commands::Session;
use crate::core::errors::StoreError;
use crate::models::models::{FollowPair, LikePair, PostInitialData, UserId, UserInitialData};
use crate::posts::PostsStorage;
use crate::users::UsersStorage;

#[derive(RustEmbed)]
#[folder = "seed"]
struct SeedAssets;

pub const DEMO_SEED_FILE: &str = "demo.json";

/// Initial bulk data for both stores.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserInitialData>,
    #[serde(default)]
    pub posts: Vec<PostInitialData>,
    #[serde(default)]
    pub likes: Vec<LikePair>,
    #[serde(default)]
    pub follows: Vec<FollowPair>,
    #[serde(default)]
    pub current_user: Option<UserId>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
        Ok(seed)
    }

    /// The dataset compiled into the crate.
    pub fn demo() -> anyhow::Result<Self> {
        let file = SeedAssets::get(DEMO_SEED_FILE)
            .ok_or_else(|| anyhow::anyhow!("Embedded seed {} not found", DEMO_SEED_FILE))?;
        let raw = std::str::from_utf8(&file.data)?;
        Ok(Self::from_json(raw)?)
    }

    /// Builds both stores. `current_user` overrides the one named in the seed.
    pub fn into_session(self, current_user: Option<UserId>) -> anyhow::Result<Session> {
        let current = current_user
            .or(self.current_user)
            .ok_or_else(|| StoreError::InvalidSeed("no current user given".to_string()))?;

        let users = UsersStorage::new(self.users, self.follows, current.clone())?;
        let posts = PostsStorage::new(self.posts, self.likes, current);
        Ok(Session::new(posts, users))
    }
}
