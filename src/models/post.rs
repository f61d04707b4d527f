use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A short anonymous post. Only `likes` changes after creation.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub user_id: String,

    /// Snapshot of the author's handle at posting time.
    pub anonymous_name: String,

    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Denormalized count of `like` reactions on this post.
    pub likes: i64,
}

/// DTO for creating a new post.
///
/// Length rules depend on the trimmed text, so they are checked by
/// `services::posts::create` rather than by a derive.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
}
