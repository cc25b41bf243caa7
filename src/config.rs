use std::path::PathBuf;

use crate::models::models::UserId;

/// Seed file to load instead of the embedded demo dataset.
pub fn seed_path() -> Option<PathBuf> {
    std::env::var("FEEDSTORE_SEED_PATH")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Current user override; falls back to the seed's `current_user`.
pub fn current_user_id() -> Option<UserId> {
    std::env::var("FEEDSTORE_CURRENT_USER")
        .ok()
        .filter(|v| !v.is_empty())
        .map(UserId::from)
}
