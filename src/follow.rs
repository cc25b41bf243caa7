use crate::models::models::{User, UserId};
use crate::users::UsersStorage;

impl UsersStorage {
    /// Makes the current user follow `target`.
    ///
    /// Returns false only when `target` is not a known user. Following someone already
    /// followed is a successful no-op. Following oneself is accepted: the current user
    /// then both follows and is followed by themself.
    pub fn follow(&mut self, target: &UserId) -> bool {
        if !self.contains(target) {
            return false;
        }
        if self.follows.insert(self.current_user_id.clone(), target.clone()) {
            tracing::debug!(follower = %self.current_user_id, followee = %target, "followed");
        }
        true
    }

    /// Stops the current user following `target`. Returns false only for unknown users.
    pub fn unfollow(&mut self, target: &UserId) -> bool {
        if !self.contains(target) {
            return false;
        }
        if self.follows.remove(&self.current_user_id, target) {
            tracing::debug!(follower = %self.current_user_id, followee = %target, "unfollowed");
        }
        true
    }

    /// Followers of `user_id`, in user list order. `None` when the user does not exist.
    pub fn users_following_user(&self, user_id: &UserId) -> Option<Vec<User>> {
        if !self.contains(user_id) {
            return None;
        }
        Some(
            self.users
                .iter()
                .filter(|u| self.follows.contains(&u.id, user_id))
                .map(|u| self.view(u))
                .collect(),
        )
    }

    /// Users followed by `user_id`, in user list order. `None` when the user does not exist.
    pub fn users_followed_by_user(&self, user_id: &UserId) -> Option<Vec<User>> {
        if !self.contains(user_id) {
            return None;
        }
        Some(
            self.users
                .iter()
                .filter(|u| self.follows.contains(user_id, &u.id))
                .map(|u| self.view(u))
                .collect(),
        )
    }
}
