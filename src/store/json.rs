//! # Flat-file JSON store
//!
//! [`JsonFileStore`] keeps each collection as one pretty-printed JSON array
//! and rewrites the whole file on every change.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//! ├── users.json       # [User]
//! ├── posts.json       # [Post], newest first
//! └── reactions.json   # [Reaction]
//! ```
//!
//! Mutations are serialized through one async mutex and land via
//! write-to-temp + rename, so readers never observe a half-written file.
//! A toggle touches two files; a crash between the two writes can leave
//! `likes` out of step with `reactions.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use super::{Collections, Store};
use crate::{
    error::AppError,
    models::{post::Post, reaction::ToggleOutcome, user::User},
};

const USERS_FILE: &str = "users.json";
const POSTS_FILE: &str = "posts.json";
const REACTIONS_FILE: &str = "reactions.json";

#[derive(Debug)]
pub struct JsonFileStore {
    base: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the data directory.
    pub async fn open(base: impl AsRef<Path>) -> Result<Self, AppError> {
        let base = base.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&base).await?;

        Ok(Self {
            base,
            write_lock: Mutex::new(()),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base.join(file)
    }

    /// Missing or blank files read as empty; unparsable ones are errors.
    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, AppError> {
        let path = self.path(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::InternalServerError(format!("Corrupt {}: {}", path.display(), e))
        })
    }

    async fn write<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), AppError> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, serde_json::to_vec_pretty(items)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut collections = Collections {
            users: self.read(USERS_FILE).await?,
            ..Default::default()
        };
        collections.insert_user(user)?;
        self.write(USERS_FILE, &collections.users).await
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self.read(USERS_FILE).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self.read(USERS_FILE).await?;
        Ok(users.into_iter().find(|u| u.phone == phone))
    }

    async fn create_post(&self, post: &Post) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut collections = Collections {
            posts: self.read(POSTS_FILE).await?,
            ..Default::default()
        };
        collections.insert_post(post);
        self.write(POSTS_FILE, &collections.posts).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.read(POSTS_FILE).await
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let posts: Vec<Post> = self.read(POSTS_FILE).await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn toggle_reaction(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<ToggleOutcome, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut collections = Collections {
            posts: self.read(POSTS_FILE).await?,
            reactions: self.read(REACTIONS_FILE).await?,
            ..Default::default()
        };
        let outcome = collections.toggle(post_id, user_id)?;

        self.write(REACTIONS_FILE, &collections.reactions).await?;
        self.write(POSTS_FILE, &collections.posts).await?;
        Ok(outcome)
    }

    async fn liked_post_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let collections = Collections {
            reactions: self.read(REACTIONS_FILE).await?,
            ..Default::default()
        };
        Ok(collections.liked_post_ids(user_id))
    }
}
