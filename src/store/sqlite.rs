use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use super::Store;
use crate::{
    error::AppError,
    models::{post::Post, reaction::ToggleOutcome, user::User},
};

/// Embedded relational store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects, creating the database file (and its directory) if needed,
    /// and applies pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied successfully.");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, phone, username, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.username)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                AppError::Conflict("User with this phone number already exists".to_string())
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, phone, username, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, phone, username, created_at FROM users WHERE phone = ?",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_post(&self, post: &Post) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, content, user_id, anonymous_name, created_at, likes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.content)
        .bind(&post.user_id)
        .bind(&post.anonymous_name)
        .bind(post.created_at)
        .bind(post.likes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::from(e)
        })?;

        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        // rowid order is insertion order, which is what "newest first" means here.
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, content, user_id, anonymous_name, created_at, likes
            FROM posts
            ORDER BY rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, content, user_id, anonymous_name, created_at, likes
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn toggle_reaction(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<ToggleOutcome, AppError> {
        // Take the write lock up front: a deferred transaction that reads and
        // then writes cannot be upgraded while another toggle holds a read lock.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let post_exists = sqlx::query_scalar::<_, i64>("SELECT 1 FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();

        if !post_exists {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let existing = sqlx::query_scalar::<_, String>(
            "SELECT id FROM reactions WHERE post_id = ? AND user_id = ?",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let liked = existing.is_none();

        let likes = if let Some(reaction_id) = existing {
            // Unlike
            sqlx::query("DELETE FROM reactions WHERE id = ?")
                .bind(reaction_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query_scalar::<_, i64>(
                "UPDATE posts SET likes = MAX(0, likes - 1) WHERE id = ? RETURNING likes",
            )
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            // Like
            sqlx::query(
                r#"
                INSERT INTO reactions (id, post_id, user_id, type, created_at)
                VALUES (?, ?, ?, 'like', ?)
                "#,
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(post_id)
            .bind(user_id)
            .bind(chrono::Utc::now())
            .execute(&mut *tx)
            .await?;

            sqlx::query_scalar::<_, i64>(
                "UPDATE posts SET likes = likes + 1 WHERE id = ? RETURNING likes",
            )
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(ToggleOutcome { liked, likes })
    }

    async fn liked_post_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT post_id FROM reactions WHERE user_id = ? AND type = 'like' ORDER BY rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
