//! Persistence for users, posts and reactions.
//!
//! Every backend implements [`Store`]; services only ever see `&dyn Store`.
//! [`JsonFileStore`] and [`MemoryStore`] hold whole collections and share the
//! toggle logic in [`Collections`]; [`SqliteStore`] does the same work in SQL.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{Config, StorageBackend},
    error::AppError,
    models::{
        post::Post,
        reaction::{Reaction, ReactionKind, ToggleOutcome},
        user::User,
    },
};

mod json;
mod memory;
mod sqlite;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Persists a new user. Fails with `Conflict` if the phone is taken.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, AppError>;

    /// Persists a new post at the head of the listing.
    async fn create_post(&self, post: &Post) -> Result<(), AppError>;

    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    async fn find_post(&self, id: &str) -> Result<Option<Post>, AppError>;

    /// Flips the like state of (post, user) and keeps `likes` in step.
    async fn toggle_reaction(&self, post_id: &str, user_id: &str)
    -> Result<ToggleOutcome, AppError>;

    /// Ids of the posts the user currently likes.
    async fn liked_post_ids(&self, user_id: &str) -> Result<Vec<String>, AppError>;
}

/// Opens the backend selected by `config.storage_backend`.
pub async fn connect(config: &Config) -> Result<SharedStore, AppError> {
    let store: SharedStore = match config.storage_backend {
        StorageBackend::Json => Arc::new(JsonFileStore::open(&config.data_dir).await?),
        StorageBackend::Sqlite => Arc::new(SqliteStore::connect(&config.database_url, 5).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!("Using {} store", store.backend_name());
    Ok(store)
}

/// Whole-collection state shared by the document-style backends.
#[derive(Debug, Clone, Default)]
pub(crate) struct Collections {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub reactions: Vec<Reaction>,
}

impl Collections {
    pub fn insert_user(&mut self, user: &User) -> Result<(), AppError> {
        if self.users.iter().any(|u| u.phone == user.phone) {
            return Err(AppError::Conflict(
                "User with this phone number already exists".to_string(),
            ));
        }
        self.users.push(user.clone());
        Ok(())
    }

    pub fn insert_post(&mut self, post: &Post) {
        self.posts.insert(0, post.clone());
    }

    /// Two-state toggle: an existing row is removed and the counter drops
    /// (floored at zero), otherwise a row is added and the counter rises.
    pub fn toggle(&mut self, post_id: &str, user_id: &str) -> Result<ToggleOutcome, AppError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let existing = self
            .reactions
            .iter()
            .position(|r| r.post_id == post_id && r.user_id == user_id);

        let liked = match existing {
            Some(index) => {
                self.reactions.remove(index);
                post.likes = (post.likes - 1).max(0);
                false
            }
            None => {
                self.reactions.push(Reaction {
                    id: uuid::Uuid::new_v4().to_string(),
                    post_id: post_id.to_string(),
                    user_id: user_id.to_string(),
                    kind: ReactionKind::Like,
                    created_at: chrono::Utc::now(),
                });
                post.likes += 1;
                true
            }
        };

        Ok(ToggleOutcome {
            liked,
            likes: post.likes,
        })
    }

    pub fn liked_post_ids(&self, user_id: &str) -> Vec<String> {
        self.reactions
            .iter()
            .filter(|r| r.user_id == user_id && r.kind == ReactionKind::Like)
            .map(|r| r.post_id.clone())
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{post, user};
    use super::*;

    #[test]
    fn toggle_alternates_and_tracks_row_count() {
        let mut c = Collections::default();
        c.insert_post(&post("p1", "u1"));

        let first = c.toggle("p1", "u1").unwrap();
        assert_eq!(first, ToggleOutcome { liked: true, likes: 1 });
        assert_eq!(c.reactions.len(), 1);

        let second = c.toggle("p1", "u1").unwrap();
        assert_eq!(second, ToggleOutcome { liked: false, likes: 0 });
        assert!(c.reactions.is_empty());
    }

    #[test]
    fn unlike_never_goes_negative() {
        let mut c = Collections::default();
        c.insert_post(&post("p1", "u1"));
        c.toggle("p1", "u1").unwrap();
        c.posts[0].likes = 0;

        let outcome = c.toggle("p1", "u1").unwrap();
        assert_eq!(outcome, ToggleOutcome { liked: false, likes: 0 });
    }

    #[test]
    fn toggle_missing_post_leaves_state_alone() {
        let mut c = Collections::default();
        c.insert_post(&post("p1", "u1"));

        assert!(matches!(c.toggle("nope", "u1"), Err(AppError::NotFound(_))));
        assert!(c.reactions.is_empty());
        assert_eq!(c.posts[0].likes, 0);
    }

    #[test]
    fn duplicate_phone_is_a_conflict() {
        let mut c = Collections::default();
        c.insert_user(&user("u1", "+212612345678")).unwrap();
        let err = c.insert_user(&user("u2", "+212612345678")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(c.users.len(), 1);
    }

    #[test]
    fn posts_are_prepended() {
        let mut c = Collections::default();
        c.insert_post(&post("a", "u1"));
        c.insert_post(&post("b", "u1"));
        let ids: Vec<_> = c.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
