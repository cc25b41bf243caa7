use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::core::db::SeedData;
use crate::core::errors::StoreError;
use crate::models::models::{Post, PostId, UserId};
use crate::posts::PostsStorage;
use crate::users::UsersStorage;

/// Both stores for one current user.
///
/// The stores stay independent; the session only routes calls and builds the feed.
#[derive(Clone, Debug)]
pub struct Session {
    pub posts: PostsStorage,
    pub users: UsersStorage,
}

impl Session {
    pub fn new(posts: PostsStorage, users: UsersStorage) -> Self {
        Self { posts, users }
    }

    /// Posts by users the current user follows, newest first.
    pub fn feed(&self) -> Vec<Post> {
        let me = self.users.current_user_id();
        let mut posts: Vec<Post> = self
            .users
            .users_followed_by_user(me)
            .unwrap_or_default()
            .iter()
            .flat_map(|u| self.posts.find_posts_by_author(&u.id))
            .collect();
        posts.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        posts
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::InternalError(e.to_string()))
}

fn arg<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str, StoreError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(StoreError::BadRequest(format!("{} required", what))),
    }
}

/// Runs one shell command against the session and returns its JSON answer.
///
/// Lookups of missing entities answer `NotFound`; mutations answer `{"ok": bool}`
/// where false means the referenced entity does not exist. Id arguments are trimmed,
/// but the `find-*` needle is everything after the single separator following the
/// command, so leading and trailing spaces take part in the prefix match.
pub fn dispatch(session: &mut Session, line: &str) -> Result<Value, StoreError> {
    let line = line.trim_start();
    let (command, needle) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };
    let rest = Some(needle.trim()).filter(|r| !r.is_empty());

    let value = match command {
        "count" => json!({"users": session.users.count(), "posts": session.posts.count()}),
        "me" => to_json(session.users.current_user())?,
        "user" => {
            let id = UserId::from(arg(rest, "User ID")?);
            let user = session
                .users
                .user(&id)
                .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
            to_json(user)?
        }
        "post" => {
            let id = PostId::from(arg(rest, "Post ID")?);
            let post = session
                .posts
                .post(&id)
                .ok_or_else(|| StoreError::NotFound("Post not found".to_string()))?;
            to_json(post)?
        }
        "posts-by" => {
            let id = UserId::from(arg(rest, "User ID")?);
            to_json(session.posts.find_posts_by_author(&id))?
        }
        // an empty search string matches everything
        "find-posts" => to_json(session.posts.find_posts_by_text(needle))?,
        "find-users" => to_json(session.users.find_users_by_text(needle))?,
        "like" => {
            let id = PostId::from(arg(rest, "Post ID")?);
            json!({"ok": session.posts.like_post(&id)})
        }
        "unlike" => {
            let id = PostId::from(arg(rest, "Post ID")?);
            json!({"ok": session.posts.unlike_post(&id)})
        }
        "likers" => {
            let id = PostId::from(arg(rest, "Post ID")?);
            let likers = session
                .posts
                .users_liked_post(&id)
                .ok_or_else(|| StoreError::NotFound("Post not found".to_string()))?;
            to_json(likers)?
        }
        "follow" => {
            let id = UserId::from(arg(rest, "User ID")?);
            json!({"ok": session.users.follow(&id)})
        }
        "unfollow" => {
            let id = UserId::from(arg(rest, "User ID")?);
            json!({"ok": session.users.unfollow(&id)})
        }
        "followers" => {
            let id = UserId::from(arg(rest, "User ID")?);
            let users = session
                .users
                .users_following_user(&id)
                .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
            to_json(users)?
        }
        "following" => {
            let id = UserId::from(arg(rest, "User ID")?);
            let users = session
                .users
                .users_followed_by_user(&id)
                .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
            to_json(users)?
        }
        "feed" => to_json(session.feed())?,
        "load" => {
            let path = Path::new(arg(rest, "Seed path")?);
            let current = session.users.current_user_id().clone();
            *session = SeedData::load(path)?.into_session(Some(current))?;
            json!({"users": session.users.count(), "posts": session.posts.count()})
        }
        "" => return Err(StoreError::BadRequest("Empty command".to_string())),
        other => return Err(StoreError::BadRequest(format!("Unknown command {}", other))),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST: &str = "51411039-ecaa-4038-9b05-4f42aee4bc2c";
    const ALICE: &str = "1973d051-ddd9-4256-860a-08b3e6fd426d";
    const BOB: &str = "fc001498-55e5-41b6-8e6d-077781e1a282";
    const BOB_POST: &str = "acc45b28-cda1-494d-b896-8c2deeb0c1f7";
    const ALICE_PROJECT: &str = "5fa8b1fd-440b-4d35-9c52-34974298d5fe";

    fn session() -> Session {
        SeedData::demo().unwrap().into_session(None).unwrap()
    }

    #[test]
    fn count_and_me() {
        let mut s = session();
        assert_eq!(dispatch(&mut s, "count").unwrap(), json!({"users": 3, "posts": 4}));
        let me = dispatch(&mut s, "me").unwrap();
        assert_eq!(me["username"], "test");
        assert_eq!(me["follows_count"], 1);
        assert_eq!(me["followed_by_count"], 1);
    }

    #[test]
    fn like_flow_through_commands() {
        let mut s = session();
        assert_eq!(dispatch(&mut s, &format!("like {}", BOB_POST)).unwrap(), json!({"ok": true}));
        let post = dispatch(&mut s, &format!("post {}", BOB_POST)).unwrap();
        assert_eq!(post["liked_by_count"], 2);
        assert_eq!(post["current_user_likes_this_post"], true);

        let likers = dispatch(&mut s, &format!("likers {}", BOB_POST)).unwrap();
        assert_eq!(likers, json!([ALICE, TEST]));

        assert_eq!(dispatch(&mut s, "like missing").unwrap(), json!({"ok": false}));
    }

    #[test]
    fn missing_entities_are_not_found() {
        let mut s = session();
        let lines = [
            "user nobody",
            "post nothing",
            "likers nothing",
            "followers nobody",
            "following nobody",
        ];
        for line in lines {
            assert!(
                matches!(dispatch(&mut s, line), Err(StoreError::NotFound(_))),
                "{} should be not found",
                line
            );
        }
    }

    #[test]
    fn bad_input_is_bad_request() {
        let mut s = session();
        assert!(matches!(dispatch(&mut s, ""), Err(StoreError::BadRequest(_))));
        assert!(matches!(dispatch(&mut s, "like"), Err(StoreError::BadRequest(_))));
        assert!(matches!(dispatch(&mut s, "dance now"), Err(StoreError::BadRequest(_))));
    }

    #[test]
    fn search_keeps_spaces_in_the_needle() {
        let mut s = session();
        let found = dispatch(&mut s, "find-posts Just finished").unwrap();
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["id"], ALICE_PROJECT);

        let all = dispatch(&mut s, "find-posts").unwrap();
        assert_eq!(all.as_array().unwrap().len(), 4);

        let trailing = dispatch(&mut s, "find-posts Just ").unwrap();
        assert_eq!(trailing.as_array().unwrap().len(), 1);
        // the extra space belongs to the needle, so nothing starts with it
        let leading = dispatch(&mut s, "find-posts  Just").unwrap();
        assert!(leading.as_array().unwrap().is_empty());

        let users = dispatch(&mut s, "find-users Test ").unwrap();
        assert_eq!(users[0]["username"], "test");
        assert!(dispatch(&mut s, "find-users Test  ").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn load_failures_are_internal_errors() {
        let mut s = session();
        let err = dispatch(&mut s, "load /nonexistent/feedstore-seed.json").unwrap_err();
        assert!(matches!(&err, StoreError::InternalError(msg) if msg.contains("seed file")));
        assert!(matches!(dispatch(&mut s, "load"), Err(StoreError::BadRequest(_))));
        // the session is untouched
        assert_eq!(dispatch(&mut s, "count").unwrap(), json!({"users": 3, "posts": 4}));
    }

    #[test]
    fn load_replaces_session_for_same_user() {
        let path = std::env::temp_dir().join(format!("feedstore-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            format!(
                r#"{{"users": [{{"id": "{}", "username": "test", "full_name": "Test User"}}]}}"#,
                TEST
            ),
        )
        .unwrap();

        let mut s = session();
        let loaded = dispatch(&mut s, &format!("load {}", path.display())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, json!({"users": 1, "posts": 0}));
        assert_eq!(s.users.current_user_id(), &UserId::from(TEST));
        assert_eq!(s.posts.current_user_id(), &UserId::from(TEST));
    }

    #[test]
    fn feed_follows_current_follows() {
        let mut s = session();
        let feed = s.feed();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, PostId::from(BOB_POST));

        dispatch(&mut s, &format!("follow {}", ALICE)).unwrap();
        let ids: Vec<_> = s.feed().into_iter().map(|p| p.id.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                ALICE_PROJECT.to_string(),
                BOB_POST.to_string(),
                "14ac941f-7101-4d24-89e0-3522089b56f1".to_string(),
            ]
        );

        dispatch(&mut s, &format!("unfollow {}", BOB)).unwrap();
        dispatch(&mut s, &format!("unfollow {}", ALICE)).unwrap();
        assert!(s.feed().is_empty());
    }
}
