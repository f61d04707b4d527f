//! Optional demo content for fresh deployments.

use chrono::{Duration, Utc};

use crate::{
    error::AppError,
    models::{post::Post, user::User},
    store::Store,
    utils::handle::generate_handle,
};

pub const DEMO_USER_ID: &str = "demo-user-1";
pub const DEMO_PHONE: &str = "+212612345678";

const DEMO_POSTS: [(&str, &str, i64); 3] = [
    (
        "demo-post-1",
        "I played professional football at 15yo, It was the best days of my life",
        48,
    ),
    ("demo-post-2", "I made a small stickers business to support myself", 24),
    ("demo-post-3", "I won an AI hackathon", 6),
];

/// Creates the demo user and posts unless the demo phone is already registered.
/// Returns whether anything was written.
pub async fn seed_demo_data(store: &dyn Store) -> Result<bool, AppError> {
    if store.find_user_by_phone(DEMO_PHONE).await?.is_some() {
        return Ok(false);
    }

    tracing::info!("Seeding demo data");

    let now = Utc::now();
    let user = User {
        id: DEMO_USER_ID.to_string(),
        name: "Anonymous User".to_string(),
        phone: DEMO_PHONE.to_string(),
        username: generate_handle(),
        created_at: now,
    };
    store.create_user(&user).await?;

    // Oldest first so the newest ends up at the head of the listing.
    for (id, content, hours_ago) in DEMO_POSTS {
        let post = Post {
            id: id.to_string(),
            content: content.to_string(),
            user_id: user.id.clone(),
            anonymous_name: user.username.clone(),
            created_at: now - Duration::hours(hours_ago),
            likes: 0,
        };
        store.create_post(&post).await?;
    }

    tracing::info!("Demo data created successfully.");
    Ok(true)
}
