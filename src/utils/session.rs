// src/utils/session.rs

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::AppError, models::user::User};

/// Name of the cookie carrying the session's user id.
pub const SESSION_COOKIE: &str = "user_id";

/// Session lifetime; the cookie is re-issued on every login/register.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// The caller identity for one request.
///
/// The cookie value is the raw user id and is not signed, so presenting a
/// known id is enough to act as that user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
        }
    }

    /// Reads the session from request cookies. Empty values count as absent.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
            .map(|value| Self {
                user_id: value.to_string(),
            })
    }

    /// Builds the `Set-Cookie` value that establishes this session.
    pub fn into_cookie(self, secure: bool) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, self.user_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
            .build()
    }
}

/// Cookie used to remove the session on logout.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Axum Middleware: Authentication.
///
/// Requires a non-empty `user_id` cookie and injects the `Session` into the
/// request extensions. Whether the user still exists is left to the handler.
pub async fn auth_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    let session = Session::from_jar(&jar)
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
