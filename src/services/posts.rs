use crate::{error::AppError, models::post::Post, store::Store};

/// Longest accepted post, counted in characters after trimming.
pub const MAX_CONTENT_CHARS: usize = 500;

/// Publishes a post under the author's anonymous handle.
pub async fn create(store: &dyn Store, content: &str, user_id: &str) -> Result<Post, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(
            "Content must be 500 characters or less".to_string(),
        ));
    }

    let author = store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    let post = Post {
        id: uuid::Uuid::new_v4().to_string(),
        content: content.to_string(),
        user_id: author.id,
        anonymous_name: author.username,
        created_at: chrono::Utc::now(),
        likes: 0,
    };

    store.create_post(&post).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(post)
}

/// Every post, newest first, with current like counters.
pub async fn list(store: &dyn Store) -> Result<Vec<Post>, AppError> {
    store.list_posts().await
}

pub async fn get_by_id(store: &dyn Store, id: &str) -> Result<Option<Post>, AppError> {
    store.find_post(id).await
}
