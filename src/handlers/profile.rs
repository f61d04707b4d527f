use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::user::UserResponse,
    services::{identity, reactions},
    store::SharedStore,
    utils::session::Session,
};

/// Get the user behind the current session.
pub async fn get_me(
    State(store): State<SharedStore>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let user = identity::current_user(store.as_ref(), Some(&session))
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "user": UserResponse::from(&user),
    })))
}

/// List ids of posts the current user has liked.
pub async fn list_my_likes(
    State(store): State<SharedStore>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let liked_posts = reactions::liked_posts(store.as_ref(), &session.user_id).await?;

    Ok(Json(json!({
        "success": true,
        "likedPosts": liked_posts,
    })))
}
