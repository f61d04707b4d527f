use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections are rendered as `{ "error": ... }` 400s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
