use axum::http::HeaderValue;

/// Default port, matching the port the web client expects in development.
const DEFAULT_PORT: u16 = 3001;

/// Default request body limit (10 MiB).
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Which backend holds projects and tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local storage; everything is lost on restart.
    Memory,
}

/// Server configuration, resolved once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins. Empty means the request origin is mirrored,
    /// which is only appropriate for development.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size (default: 10 MiB).
    pub body_limit_bytes: usize,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `3001`                                    |
    /// | `CORS_ORIGINS`         | empty (mirror request origin)             |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `BODY_LIMIT_BYTES`     | `10485760`                                |
    /// | `STORE`                | `postgres` if `DATABASE_URL` set, else `memory` |
    /// | `DATABASE_URL`         | required for `postgres`                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: origin.clone(),
                reason: e.to_string(),
            })?;
        }

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let backend = lookup("STORE").map(|s| s.trim().to_ascii_lowercase());
        let store = match (backend.as_deref(), database_url) {
            (Some("memory"), _) | (None, None) => StoreConfig::Memory,
            (Some("postgres") | None, Some(database_url)) => StoreConfig::Postgres {
                database_url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            },
            (Some("postgres"), None) => return Err(ConfigError::Missing("DATABASE_URL")),
            (Some(other), _) => {
                return Err(ConfigError::Invalid {
                    key: "STORE",
                    value: other.to_string(),
                    reason: "expected 'postgres' or 'memory'".to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            store,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
