// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::error::AppError;

/// Which `Store` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Three JSON arrays under `DATA_DIR`.
    Json,
    /// Embedded SQLite database at `DATABASE_URL`.
    Sqlite,
    /// Volatile in-process collections.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::InternalServerError(format!(
                "Unknown STORAGE_BACKEND '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Sets the `Secure` attribute on the session cookie.
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_backend = var("STORAGE_BACKEND", "json").parse()?;

        let data_dir = PathBuf::from(var("DATA_DIR", "data"));

        let database_url = var("DATABASE_URL", "sqlite://data/anon_feed.db?mode=rwc");

        let bind_addr = var("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| AppError::InternalServerError(format!("Invalid BIND_ADDR: {}", e)))?;

        let cookie_secure = var("APP_ENV", "development").eq_ignore_ascii_case("production");

        let cors_origins = var(
            "CORS_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000",
        )
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

        let seed_demo_data = matches!(
            var("SEED_DEMO_DATA", "false").to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );

        let rust_log = var("RUST_LOG", "info");

        Ok(Self {
            storage_backend,
            data_dir,
            database_url,
            bind_addr,
            cookie_secure,
            cors_origins,
            seed_demo_data,
            rust_log,
        })
    }
}
