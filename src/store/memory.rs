use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collections, Store};
use crate::{
    error::AppError,
    models::{post::Post, reaction::ToggleOutcome, user::User},
};

/// Volatile store for tests and throwaway deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.inner.write().await.insert_user(user)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.phone == phone).cloned())
    }

    async fn create_post(&self, post: &Post) -> Result<(), AppError> {
        self.inner.write().await.insert_post(post);
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn toggle_reaction(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<ToggleOutcome, AppError> {
        self.inner.write().await.toggle(post_id, user_id)
    }

    async fn liked_post_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self.inner.read().await.liked_post_ids(user_id))
    }
}
