//! Database migration command.
//!
//! # Environment Variables
//!
//! - `AJANDA_DATABASE_URL` (or `DATABASE_URL`) - `SQLite` connection string
//!
//! Migration files live in `crates/server/migrations/` and are embedded in
//! the server library at build time.

use avukat_ajanda_server::config::StorageBackend;
use avukat_ajanda_server::db::SqliteStore;

use super::{CommandError, load_config};

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the backend is
/// `memory://`, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = load_config()?;
    let database = &config.database;

    let StorageBackend::Sqlite { url } = &database.backend else {
        return Err(CommandError::NeedsDatabase("migrate"));
    };

    tracing::info!(database = %database.backend.redacted(), "Connecting to database...");
    let store = SqliteStore::connect(url, database.max_connections, database.acquire_timeout).await?;

    tracing::info!("Running migrations...");
    store.migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
