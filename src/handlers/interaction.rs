use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{error::AppError, services::reactions, store::SharedStore, utils::session::Session};

/// Toggle Like on a post.
pub async fn toggle_like(
    State(store): State<SharedStore>,
    Extension(session): Extension<Session>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = reactions::toggle(store.as_ref(), &post_id, &session.user_id).await?;

    Ok(Json(json!({
        "success": true,
        "liked": outcome.liked,
        "likes": outcome.likes,
    })))
}
