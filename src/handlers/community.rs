use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::post::CreatePostRequest,
    services::{identity, posts},
    store::SharedStore,
    utils::{json::AppJson, session::Session},
};

/// Create a new post under the caller's anonymous handle.
/// Requires: Login.
pub async fn create_post(
    State(store): State<SharedStore>,
    Extension(session): Extension<Session>,
    payload: Result<AppJson<CreatePostRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // The cookie may outlive the account it names; that is reported
    // ahead of any problem with the body.
    let user = identity::current_user(store.as_ref(), Some(&session))
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let AppJson(payload) = payload?;

    let post = posts::create(store.as_ref(), &payload.content, &user.id).await?;

    Ok(Json(json!({ "success": true, "post": post })))
}

/// List posts (Recent first). No pagination.
pub async fn list_posts(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let posts = posts::list(store.as_ref()).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        e
    })?;

    Ok(Json(json!({ "success": true, "posts": posts })))
}

/// Get a single post by ID.
pub async fn get_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = posts::get_by_id(store.as_ref(), &id)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(json!({ "success": true, "post": post })))
}
