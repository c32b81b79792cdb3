use std::{fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub store_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::EnvError("JWT_SECRET must be set".into()))?;

        let storage_backend = try_load(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres);
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(AppError::EnvError(
                "DATABASE_URL must be set for the postgres backend".into(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port: try_load(&lookup, "PORT", 3001),
            jwt_secret,
            storage_backend,
            database_url,
            database_max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            allowed_origins,
            store_timeout: Duration::from_millis(try_load(&lookup, "STORE_TIMEOUT_MS", 5000)),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
    }
}
