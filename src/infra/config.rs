//! Centralized configuration (environment variables + defaults).

use anyhow::{bail, Context, Result};
use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("Unknown STORE_BACKEND '{}' (expected: postgres | memory)", other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Empty when the memory backend is selected.
    pub database_url: String,
    pub students_table: String,
    pub server_address: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let store_backend: StoreBackend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()?;

        let database_url = match store_backend {
            StoreBackend::Postgres => database_url()?,
            StoreBackend::Memory => String::new(),
        };

        Ok(Config {
            store_backend,
            database_url,
            students_table: env::var("STUDENTS_TABLE").unwrap_or_else(|_| "students".to_string()),
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: parsed_var::<u32>("DB_MAX_CONNECTIONS", 5)?.max(1),
            db_acquire_timeout_secs: parsed_var::<u64>("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
        })
    }

    /// Configuration for an in-process server backed by the memory store.
    pub fn in_memory() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            database_url: String::new(),
            students_table: "students".to_string(),
            server_address: "127.0.0.1:0".to_string(),
            db_max_connections: 1,
            db_acquire_timeout_secs: 10,
        }
    }
}

/// `DATABASE_URL` if set, otherwise assembled from the `DB_*` parts.
pub fn database_url() -> Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = env::var("DB_HOST").context("Either DATABASE_URL or DB_HOST must be set")?;
    let port: u16 = parsed_var("DB_PORT", 5432)?;
    let name = env::var("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not")?;
    let user = env::var("DB_USER").context("DB_USER must be set when DATABASE_URL is not")?;
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    Ok(assemble_database_url(&host, port, &name, &user, &password))
}

/// Builds a postgres connection string, percent-encoding the credentials.
pub fn assemble_database_url(
    host: &str,
    port: u16,
    name: &str,
    user: &str,
    password: &str,
) -> String {
    let user = urlencoding::encode(user);
    if password.is_empty() {
        format!("postgres://{}@{}:{}/{}", user, host, port, name)
    } else {
        let password = urlencoding::encode(password);
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}

fn parsed_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} must be a valid number: {}", key, e)),
        Err(_) => Ok(default),
    }
}
