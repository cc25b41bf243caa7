use std::collections::HashMap;

use crate::core::errors::StoreError;
use crate::core::helpers::matches_prefix;
use crate::core::relation::Relation;
use crate::models::models::{FollowPair, User, UserId, UserInitialData};

/// Users plus the follow relation, seen from one current user.
///
/// Follow counters and the two relative flags are computed from the follow relation
/// whenever a [`User`] is returned. Follow mutations live in [`crate::follow`].
#[derive(Clone, Debug)]
pub struct UsersStorage {
    pub(crate) users: Vec<UserInitialData>,
    pub(crate) index: HashMap<UserId, usize>,
    pub(crate) follows: Relation<UserId, UserId>,
    pub(crate) current_user_id: UserId,
}

impl UsersStorage {
    /// Builds the store, failing when `current_user_id` is not one of `users`.
    pub fn new(
        users: Vec<UserInitialData>,
        follows: Vec<FollowPair>,
        current_user_id: UserId,
    ) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(users.len());
        for (pos, user) in users.iter().enumerate() {
            index.entry(user.id.clone()).or_insert(pos);
        }

        if !index.contains_key(&current_user_id) {
            return Err(StoreError::CurrentUserNotFound(current_user_id.to_string()));
        }

        let follows: Relation<UserId, UserId> = follows.into_iter().collect();
        for (follower, followee) in follows.iter() {
            if !index.contains_key(follower) || !index.contains_key(followee) {
                tracing::warn!(%follower, %followee, "follow references an unknown user");
            }
        }

        tracing::debug!(users = users.len(), follows = follows.len(), "users storage ready");
        Ok(Self {
            users,
            index,
            follows,
            current_user_id,
        })
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn current_user_id(&self) -> &UserId {
        &self.current_user_id
    }

    pub fn current_user(&self) -> User {
        // presence was checked in `new` and users are never removed
        let pos = self.index[&self.current_user_id];
        self.view(&self.users[pos])
    }

    pub fn user(&self, user_id: &UserId) -> Option<User> {
        self.index.get(user_id).map(|&pos| self.view(&self.users[pos]))
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.index.contains_key(user_id)
    }

    /// Every user in input order.
    pub fn users(&self) -> Vec<User> {
        self.users.iter().map(|u| self.view(u)).collect()
    }

    /// Users whose username or full name starts with `search`.
    pub fn find_users_by_text(&self, search: &str) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| matches_prefix(&u.username, search) || matches_prefix(&u.full_name, search))
            .map(|u| self.view(u))
            .collect()
    }

    pub(crate) fn view(&self, record: &UserInitialData) -> User {
        let me = &self.current_user_id;
        User {
            id: record.id.clone(),
            username: record.username.clone(),
            full_name: record.full_name.clone(),
            avatar_url: record.avatar_url.clone(),
            current_user_follows_this_user: self.follows.contains(me, &record.id),
            current_user_is_followed_by_this_user: self.follows.contains(&record.id, me),
            follows_count: self.follows.count_rights_of(&record.id),
            followed_by_count: self.follows.count_lefts_of(&record.id),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, username: &str, full_name: &str) -> UserInitialData {
        UserInitialData {
            id: UserId::from(id),
            username: username.to_string(),
            full_name: full_name.to_string(),
            avatar_url: None,
        }
    }

    pub(crate) fn follow(a: &str, b: &str) -> FollowPair {
        (UserId::from(a), UserId::from(b))
    }

    pub(crate) fn storage() -> UsersStorage {
        UsersStorage::new(
            vec![
                record("a", "alice", "Alice Liddell"),
                record("b", "bob", "Bob Marley"),
                record("c", "carol", "Ali Carol"),
            ],
            vec![follow("a", "b"), follow("c", "a"), follow("b", "c")],
            UserId::from("a"),
        )
        .unwrap()
    }

    #[test]
    fn construction_fails_without_current_user() {
        let result = UsersStorage::new(
            vec![record("a", "alice", "Alice Liddell")],
            vec![],
            UserId::from("zed"),
        );
        assert!(matches!(result, Err(StoreError::CurrentUserNotFound(id)) if id == "zed"));
    }

    #[test]
    fn construction_derives_counts_and_flags() {
        let store = storage();
        assert_eq!(store.count(), 3);

        let me = store.current_user();
        assert_eq!(me.id, UserId::from("a"));
        assert_eq!(me.follows_count, 1);
        assert_eq!(me.followed_by_count, 1);

        let bob = store.user(&UserId::from("b")).unwrap();
        assert!(bob.current_user_follows_this_user);
        assert!(!bob.current_user_is_followed_by_this_user);

        let carol = store.user(&UserId::from("c")).unwrap();
        assert!(!carol.current_user_follows_this_user);
        assert!(carol.current_user_is_followed_by_this_user);
    }

    #[test]
    fn dangling_follows_count_but_are_not_listed() {
        let store = UsersStorage::new(
            vec![record("a", "alice", "Alice Liddell"), record("b", "bob", "Bob Marley")],
            vec![follow("ghost", "b"), follow("a", "b"), follow("b", "nobody")],
            UserId::from("a"),
        )
        .unwrap();
        let b = UserId::from("b");

        let bob = store.user(&b).unwrap();
        assert_eq!(bob.followed_by_count, 2);
        assert_eq!(bob.follows_count, 1);

        let listed: Vec<_> = store
            .users_following_user(&b)
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(listed, vec![UserId::from("a")]);
        assert!(store.users_followed_by_user(&b).unwrap().is_empty());
    }

    #[test]
    fn unknown_user_is_absent() {
        let store = storage();
        assert!(store.user(&UserId::from("nobody")).is_none());
        assert!(!store.contains(&UserId::from("nobody")));
    }

    #[test]
    fn find_by_text_matches_username_or_full_name() {
        let store = storage();
        let ids: Vec<_> = store
            .find_users_by_text("Ali")
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![UserId::from("a"), UserId::from("c")]);

        let ids: Vec<_> = store
            .find_users_by_text("bo")
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![UserId::from("b")]);

        assert!(store.find_users_by_text("Marley").is_empty());
        assert!(store.find_users_by_text("ALICE").is_empty());
    }
}
