// tests/feed_tests.rs

mod common;

use std::sync::Arc;

use anon_feed::store::JsonFileStore;
use common::{browser, register, spawn_app, spawn_app_with};

async fn create_post(client: &reqwest::Client, address: &str, content: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/posts", address))
        .json(&serde_json::json!({ "content": content }))
        .send()
        .await
        .expect("Create post failed")
}

async fn toggle(client: &reqwest::Client, address: &str, post_id: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/posts/{}/reactions", address, post_id))
        .send()
        .await
        .expect("Toggle failed")
}

async fn list(address: &str) -> serde_json::Value {
    reqwest::get(format!("{}/api/posts", address))
        .await
        .expect("List failed")
        .json()
        .await
        .expect("Failed to parse posts json")
}

#[tokio::test]
async fn test_post_and_like_end_to_end() {
    // Arrange
    let address = spawn_app().await;
    let client = browser();
    let registered = register(&client, &address, "Alice", "0612345678").await;
    let username = registered["user"]["username"].as_str().unwrap().to_string();

    // 1. Create a post
    let created = create_post(&client, &address, "Hello").await;
    assert_eq!(created.status().as_u16(), 200);
    let created: serde_json::Value = created.json().await.unwrap();
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    // 2. It is listed with zero likes under the generated handle
    let feed = list(&address).await;
    let posts = feed["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["content"], "Hello");
    assert_eq!(posts[0]["likes"], 0);
    assert_eq!(posts[0]["anonymousName"], username.as_str());
    assert!(posts[0]["createdAt"].is_string());

    // 3. Like
    let liked: serde_json::Value = toggle(&client, &address, &post_id).await.json().await.unwrap();
    assert_eq!(liked["liked"], true);
    assert_eq!(liked["likes"], 1);

    let mine: serde_json::Value = client
        .get(format!("{}/api/user/liked-posts", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine["likedPosts"], serde_json::json!([post_id.clone()]));

    // 4. Unlike
    let unliked: serde_json::Value = toggle(&client, &address, &post_id).await.json().await.unwrap();
    assert_eq!(unliked["liked"], false);
    assert_eq!(unliked["likes"], 0);

    let single: serde_json::Value = reqwest::get(format!("{}/api/posts/{}", address, post_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(single["post"]["likes"], 0);
}

#[tokio::test]
async fn test_feed_is_newest_first() {
    let address = spawn_app().await;
    let client = browser();
    register(&client, &address, "Alice", "0612345678").await;

    create_post(&client, &address, "A").await;
    create_post(&client, &address, "B").await;

    let feed = list(&address).await;
    let contents: Vec<&str> = feed["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["B", "A"]);
}

#[tokio::test]
async fn test_post_content_rules() {
    let address = spawn_app().await;
    let client = browser();
    register(&client, &address, "Alice", "0612345678").await;

    let too_long = create_post(&client, &address, &"x".repeat(501)).await;
    assert_eq!(too_long.status().as_u16(), 400);
    let body: serde_json::Value = too_long.json().await.unwrap();
    assert_eq!(body["error"], "Content must be 500 characters or less");

    let blank = create_post(&client, &address, "   ").await;
    assert_eq!(blank.status().as_u16(), 400);
    let body: serde_json::Value = blank.json().await.unwrap();
    assert_eq!(body["error"], "Content is required");

    let exact = create_post(&client, &address, &"x".repeat(500)).await;
    assert_eq!(exact.status().as_u16(), 200);

    assert_eq!(list(&address).await["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_protected_routes_need_session() {
    let address = spawn_app().await;
    let anonymous = reqwest::Client::new();

    assert_eq!(create_post(&anonymous, &address, "Hi").await.status().as_u16(), 401);
    assert_eq!(toggle(&anonymous, &address, "whatever").await.status().as_u16(), 401);

    let liked = anonymous
        .get(format!("{}/api/user/liked-posts", address))
        .send()
        .await
        .unwrap();
    assert_eq!(liked.status().as_u16(), 401);

    let logout = anonymous
        .post(format!("{}/api/auth/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status().as_u16(), 401);

    // Listing stays public
    let feed = reqwest::get(format!("{}/api/posts", address)).await.unwrap();
    assert_eq!(feed.status().as_u16(), 200);
}

#[tokio::test]
async fn test_missing_post_and_stale_author() {
    let address = spawn_app().await;
    let client = browser();
    register(&client, &address, "Alice", "0612345678").await;

    let missing = toggle(&client, &address, "no-such-post").await;
    assert_eq!(missing.status().as_u16(), 404);
    let body: serde_json::Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Post not found");

    let lookup = reqwest::get(format!("{}/api/posts/no-such-post", address))
        .await
        .unwrap();
    assert_eq!(lookup.status().as_u16(), 404);

    let ghost = reqwest::Client::new()
        .post(format!("{}/api/posts", address))
        .header(reqwest::header::COOKIE, "user_id=ghost")
        .json(&serde_json::json!({ "content": "Hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(ghost.status().as_u16(), 404);
    let body: serde_json::Value = ghost.json().await.unwrap();
    assert_eq!(body["error"], "User not found");

    // A stale account wins over a malformed body
    let ghost_garbage = reqwest::Client::new()
        .post(format!("{}/api/posts", address))
        .header(reqwest::header::COOKIE, "user_id=ghost")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(ghost_garbage.status().as_u16(), 404);
    let body: serde_json::Value = ghost_garbage.json().await.unwrap();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_unknown_session_user_cannot_react() {
    let address = spawn_app().await;
    let client = browser();
    register(&client, &address, "Alice", "0612345678").await;

    let created: serde_json::Value = create_post(&client, &address, "Hello")
        .await
        .json()
        .await
        .unwrap();
    let post_id = created["post"]["id"].as_str().unwrap();

    let ghost = reqwest::Client::new();
    let toggled = ghost
        .post(format!("{}/api/posts/{}/reactions", address, post_id))
        .header(reqwest::header::COOKIE, "user_id=ghost")
        .send()
        .await
        .unwrap();
    assert_eq!(toggled.status().as_u16(), 401);
    let body: serde_json::Value = toggled.json().await.unwrap();
    assert_eq!(body["error"], "Not authenticated");

    let liked = ghost
        .get(format!("{}/api/user/liked-posts", address))
        .header(reqwest::header::COOKIE, "user_id=ghost")
        .send()
        .await
        .unwrap();
    assert_eq!(liked.status().as_u16(), 401);

    let feed = list(&address).await;
    assert_eq!(feed["posts"][0]["likes"], 0);
}

#[tokio::test]
async fn test_json_store_backs_the_api() {
    let dir = std::env::temp_dir().join(format!("anon_feed_api_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let store = JsonFileStore::open(&dir).await.expect("Failed to open store");
    let address = spawn_app_with(Arc::new(store)).await;
    let client = browser();
    register(&client, &address, "Alice", "0612345678").await;

    let created: serde_json::Value = create_post(&client, &address, "On disk")
        .await
        .json()
        .await
        .unwrap();
    let post_id = created["post"]["id"].as_str().unwrap();
    toggle(&client, &address, post_id).await;

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.join("posts.json")).unwrap()).unwrap();
    assert_eq!(on_disk[0]["content"], "On disk");
    assert_eq!(on_disk[0]["likes"], 1);

    let _ = std::fs::remove_dir_all(&dir);
}
