use axum_extra::extract::cookie::Cookie;

use crate::{
    error::AppError,
    models::user::User,
    store::Store,
    utils::{
        handle::generate_handle,
        phone,
        session::{Session, removal_cookie},
    },
};

const INVALID_PHONE: &str = "Phone number must be in format +212XXXXXXXXX (9 digits after +212)";

fn canonical_phone(raw: &str) -> Result<String, AppError> {
    let formatted = phone::format(raw.trim());
    if !phone::validate(&formatted) {
        return Err(AppError::BadRequest(INVALID_PHONE.to_string()));
    }
    Ok(formatted)
}

/// Creates an account with a fresh anonymous handle and opens a session for it.
pub async fn register(
    store: &dyn Store,
    name: &str,
    phone: &str,
) -> Result<(User, Session), AppError> {
    let name = name.trim();
    if name.is_empty() || phone.trim().is_empty() {
        return Err(AppError::BadRequest("Name and phone are required".to_string()));
    }

    let phone = canonical_phone(phone)?;

    if store.find_user_by_phone(&phone).await?.is_some() {
        return Err(AppError::Conflict(
            "User with this phone number already exists".to_string(),
        ));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        phone,
        username: generate_handle(),
        created_at: chrono::Utc::now(),
    };

    store.create_user(&user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let session = Session::for_user(&user);
    Ok((user, session))
}

/// Opens a session for the user owning `phone`.
pub async fn login(store: &dyn Store, phone: &str) -> Result<(User, Session), AppError> {
    if phone.trim().is_empty() {
        return Err(AppError::BadRequest("Phone number is required".to_string()));
    }

    let phone = canonical_phone(phone)?;

    let user = store
        .find_user_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found. Please register first.".to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");

    let session = Session::for_user(&user);
    Ok((user, session))
}

/// Resolves the session to its user; `None` when absent or stale.
pub async fn current_user(
    store: &dyn Store,
    session: Option<&Session>,
) -> Result<Option<User>, AppError> {
    match session {
        Some(session) => store.find_user_by_id(&session.user_id).await,
        None => Ok(None),
    }
}

/// Ends the session. Nothing is stored server-side; the returned cookie
/// overwrites the client's session cookie.
pub fn logout(session: Session) -> Cookie<'static> {
    tracing::info!(user_id = %session.user_id, "User logged out");
    removal_cookie()
}
