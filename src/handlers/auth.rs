// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, UserResponse},
    services::identity,
    store::SharedStore,
    utils::{json::AppJson, session::Session},
};

/// Registers a new user from a name and phone number.
///
/// Normalizes the phone, assigns an anonymous handle and sets the session cookie.
pub async fn register(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    jar: CookieJar,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, session) = identity::register(store.as_ref(), &payload.name, &payload.phone).await?;

    let jar = jar.add(session.into_cookie(config.cookie_secure));

    Ok((
        jar,
        Json(json!({
            "success": true,
            "user": UserResponse::from(&user),
        })),
    ))
}

/// Logs in by phone number alone and re-issues the session cookie.
pub async fn login(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, session) = identity::login(store.as_ref(), &payload.phone).await?;

    let jar = jar.add(session.into_cookie(config.cookie_secure));

    Ok((
        jar,
        Json(json!({
            "success": true,
            "user": UserResponse::from(&user),
        })),
    ))
}

/// Clears the session cookie.
pub async fn logout(
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let cleared = identity::logout(session);

    Ok((jar.remove(cleared), Json(json!({ "success": true }))))
}
