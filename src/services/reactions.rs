use crate::{error::AppError, models::reaction::ToggleOutcome, store::Store};

/// A session id that no longer names a user is treated as no session.
async fn require_user(store: &dyn Store, user_id: &str) -> Result<(), AppError> {
    match store.find_user_by_id(user_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::AuthError("Not authenticated".to_string())),
    }
}

/// Likes the post for this user if not yet liked, otherwise removes the like.
///
/// An unknown user fails with `AuthError` and an unknown post with `NotFound`,
/// both before anything is written.
pub async fn toggle(
    store: &dyn Store,
    post_id: &str,
    user_id: &str,
) -> Result<ToggleOutcome, AppError> {
    require_user(store, user_id).await?;

    if store.find_post(post_id).await?.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let outcome = store.toggle_reaction(post_id, user_id).await?;
    tracing::info!(
        post_id,
        user_id,
        liked = outcome.liked,
        likes = outcome.likes,
        "Reaction toggled"
    );

    Ok(outcome)
}

/// Ids of the posts `user_id` currently likes.
pub async fn liked_posts(store: &dyn Store, user_id: &str) -> Result<Vec<String>, AppError> {
    require_user(store, user_id).await?;
    store.liked_post_ids(user_id).await
}
