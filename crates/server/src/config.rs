//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `AJANDA_DATABASE_URL` (or `DATABASE_URL`) - Storage location
//!   (default: `sqlite://avukat_ajanda.db`). `sqlite:` URLs use SQLite,
//!   `memory://` keeps everything in process memory.
//! - `AJANDA_DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `AJANDA_DATABASE_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 10)
//! - `AJANDA_AUTO_MIGRATE` - Apply migrations on startup (default: true)
//! - `AJANDA_HOST` - Bind address (default: 127.0.0.1)
//! - `AJANDA_PORT` (or `PORT`) - Listen port (default: 8000)
//! - `AJANDA_ENV` - Environment label (default: development)
//! - `AJANDA_CORS_ORIGINS` - Comma-separated allowed origins, `*` for any (default: `*`)
//! - `AJANDA_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://avukat_ajanda.db";
const MEMORY_DATABASE_URL: &str = "memory://";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which backend serves the registries.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// SQLite database at the given connection string (may contain credentials).
    Sqlite { url: SecretString },
    /// Process-lifetime in-memory store.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub auto_migrate: bool,
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend and pool settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Environment label reported by `/api/version` and Sentry
    pub environment: String,
    /// Allowed CORS origins
    pub cors_origins: CorsOrigins,
    /// Log line format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry error sample rate (0.0 - 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate (0.0 - 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let database = DatabaseConfig {
            backend: parse_backend(
                vars.first_of(&["AJANDA_DATABASE_URL", "DATABASE_URL"])
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            )?,
            max_connections: vars.parse_or("AJANDA_DATABASE_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(
                vars.parse_or("AJANDA_DATABASE_ACQUIRE_TIMEOUT_SECS", 10)?,
            ),
            auto_migrate: vars.parse_or("AJANDA_AUTO_MIGRATE", true)?,
        };

        let host = vars.parse_or("AJANDA_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = match vars.first_of(&["AJANDA_PORT", "PORT"]) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("AJANDA_PORT".to_owned(), e.to_string()))?,
            None => 8000,
        };

        let environment = vars
            .get("AJANDA_ENV")
            .unwrap_or_else(|| "development".to_owned());
        let cors_origins = parse_cors_origins(vars.get("AJANDA_CORS_ORIGINS").as_deref())?;
        let log_format = match vars.get("AJANDA_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("" | "text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "AJANDA_LOG_FORMAT".to_owned(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            database,
            host,
            port,
            environment,
            cors_origins,
            log_format,
            sentry_dsn: vars.get("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty()),
            sentry_sample_rate: vars.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: vars.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get the first of several variables that is set.
    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Parse a variable, falling back to `default` when it is unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
    }
}

/// Select the storage backend from a connection string.
fn parse_backend(url: String) -> Result<StorageBackend, ConfigError> {
    let trimmed = url.trim();
    if trimmed == MEMORY_DATABASE_URL {
        return Ok(StorageBackend::Memory);
    }
    if trimmed.starts_with("sqlite:") {
        return Ok(StorageBackend::Sqlite {
            url: SecretString::from(trimmed.to_owned()),
        });
    }

    // Only the scheme is echoed back; the rest may hold credentials.
    let scheme = trimmed.split(':').next().unwrap_or_default();
    Err(ConfigError::InvalidEnvVar(
        "AJANDA_DATABASE_URL".to_owned(),
        format!("unsupported scheme '{scheme}' (expected 'sqlite:' or '{MEMORY_DATABASE_URL}')"),
    ))
}

/// Parse the CORS origin list.
fn parse_cors_origins(raw: Option<&str>) -> Result<CorsOrigins, ConfigError> {
    let raw = raw.map(str::trim).unwrap_or("*");
    if raw.is_empty() || raw == "*" {
        return Ok(CorsOrigins::Any);
    }

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("AJANDA_CORS_ORIGINS".to_owned(), e.to_string())
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

impl StorageBackend {
    /// The connection string, for logging with credentials removed.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::Memory => MEMORY_DATABASE_URL.to_owned(),
            Self::Sqlite { url } => url
                .expose_secret()
                .split('?')
                .next()
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert!(matches!(
            config.database.backend,
            StorageBackend::Sqlite { ref url } if url.expose_secret() == DEFAULT_DATABASE_URL
        ));
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.auto_migrate);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8000");
        assert_eq!(config.environment, "development");
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_primary_keys_win_over_fallbacks() {
        let config = config_from(&[
            ("AJANDA_DATABASE_URL", "memory://"),
            ("DATABASE_URL", "sqlite://other.db"),
            ("PORT", "9000"),
        ])
        .unwrap();

        assert!(matches!(config.database.backend, StorageBackend::Memory));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_generic_database_url_fallback() {
        let config = config_from(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database.backend.redacted(), "sqlite::memory:");
    }

    #[test]
    fn test_unsupported_database_scheme() {
        let err = config_from(&[("DATABASE_URL", "postgres://user:hunter2@db/app")]).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("postgres"));
        assert!(!message.contains("hunter2"));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("AJANDA_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "AJANDA_PORT"));
    }

    #[test]
    fn test_cors_origin_list() {
        let config = config_from(&[(
            "AJANDA_CORS_ORIGINS",
            "http://localhost:3000, https://ajanda.example.com",
        )])
        .unwrap();

        let CorsOrigins::List(origins) = config.cors_origins else {
            panic!("expected an origin list");
        };
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://ajanda.example.com");
    }

    #[test]
    fn test_log_format_and_sentry() {
        let config = config_from(&[
            ("AJANDA_LOG_FORMAT", "json"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);

        assert!(config_from(&[("AJANDA_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let config = config_from(&[("AJANDA_DATABASE_URL", "sqlite://secret-path.db")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("secret-path"));
    }
}
