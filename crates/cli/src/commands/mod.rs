//! Subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod stats;

use thiserror::Error;

use avukat_ajanda_core::EmailError;
use avukat_ajanda_server::config::{ConfigError, ServerConfig};
use avukat_ajanda_server::db::RepositoryError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment could not be turned into a configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// A generated email failed validation.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// The command needs a persistent database but `memory://` is configured.
    #[error("`{0}` needs a SQLite database; DATABASE_URL points at memory://")]
    NeedsDatabase(&'static str),
}

/// Load the server configuration from the environment.
fn load_config() -> Result<ServerConfig, CommandError> {
    Ok(ServerConfig::from_env()?)
}
