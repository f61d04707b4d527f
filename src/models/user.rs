// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A registered account. Immutable once created.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub name: String,

    /// Canonical `+212XXXXXXXXX` form, unique across users.
    pub phone: String,

    /// Generated anonymous handle, reused on every post by this user.
    pub username: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public view of a user returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            username: user.username.clone(),
        }
    }
}

/// DTO for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name and phone are required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name and phone are required"))]
    pub phone: String,
}

/// DTO for phone login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
}
