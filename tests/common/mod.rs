// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use anon_feed::{
    config::{Config, StorageBackend},
    routes,
    state::AppState,
    store::{MemoryStore, SharedStore},
};

pub fn test_config() -> Config {
    Config {
        storage_backend: StorageBackend::Memory,
        data_dir: std::env::temp_dir(),
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cookie_secure: false,
        cors_origins: vec!["http://localhost:3000".to_string()],
        seed_demo_data: false,
        rust_log: "error".to_string(),
    }
}

/// Spawns the app on a random port backed by `store`.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app_with(store: SharedStore) -> String {
    let state = AppState {
        store,
        config: test_config(),
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub async fn spawn_app() -> String {
    spawn_app_with(Arc::new(MemoryStore::new())).await
}

/// Client that keeps the session cookie between requests, like a browser.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

pub async fn register(
    client: &reqwest::Client,
    address: &str,
    name: &str,
    phone: &str,
) -> serde_json::Value {
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({ "name": name, "phone": phone }))
        .send()
        .await
        .expect("Register failed");

    assert_eq!(response.status().as_u16(), 200);
    response.json().await.expect("Failed to parse register json")
}
