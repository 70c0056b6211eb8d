use std::str::FromStr;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where converted readings are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Postgres { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!("unknown storage backend: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage: Storage,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let max_connections = optional("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        Ok(Self {
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            storage: parse_storage(
                &optional("STORAGE_BACKEND", "postgres"),
                std::env::var("DATABASE_URL").ok(),
                max_connections,
            )?,
        })
    }
}

/// Build the storage selection from `STORAGE_BACKEND` and, for Postgres,
/// `DATABASE_URL`.
fn parse_storage(
    backend: &str,
    database_url: Option<String>,
    max_connections: u32,
) -> Result<Storage> {
    let backend = backend
        .trim()
        .parse::<StorageBackend>()
        .context("STORAGE_BACKEND must be 'postgres' or 'memory'")?;

    match backend {
        StorageBackend::Memory => Ok(Storage::Memory),
        StorageBackend::Postgres => {
            let database_url = database_url
                .filter(|url| !url.is_empty())
                .context("missing required env var: DATABASE_URL")?;
            Ok(Storage::Postgres { database_url, max_connections })
        }
    }
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_storage_memory_ignores_database_url() {
        let s = parse_storage("memory", Some("postgres://x".into()), 10).unwrap();
        assert_eq!(s, Storage::Memory);
    }

    #[test]
    fn parse_storage_postgres_with_url() {
        let s = parse_storage("postgres", Some("postgres://db/lora".into()), 4).unwrap();
        assert_eq!(
            s,
            Storage::Postgres {
                database_url: "postgres://db/lora".into(),
                max_connections: 4,
            }
        );
    }

    #[test]
    fn parse_storage_postgres_without_url_errors() {
        let err = parse_storage("postgres", None, 10).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = parse_storage("postgres", Some(String::new()), 10).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn parse_storage_unknown_backend_errors() {
        let err = parse_storage("redis", None, 10).unwrap_err();
        assert!(err.to_string().contains("STORAGE_BACKEND"));
        assert!(format!("{err:#}").contains("unknown storage backend"));
    }

    #[test]
    fn storage_backend_from_str() {
        assert_eq!("postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
    }
}
