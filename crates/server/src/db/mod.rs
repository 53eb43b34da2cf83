//! Storage for clients and cases.
//!
//! # Tables
//!
//! - `clients` - registered clients, unique on `email`
//! - `cases` - legal cases, unique on `case_no`; `client_id` is unchecked
//!
//! # Backends
//!
//! Both registries are served through the [`Store`] trait so handlers never
//! know which backend is active:
//!
//! - [`SqliteStore`] - durable, file-backed (or `sqlite::memory:`) via `sqlx`
//! - [`MemoryStore`] - process-lifetime state, used for tests and demos
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! binary. They run on startup unless `AJANDA_AUTO_MIGRATE=false`, and can be
//! run explicitly via:
//! ```bash
//! cargo run -p avukat-ajanda-cli -- migrate
//! ```

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use avukat_ajanda_core::{CaseId, ClientId};

use crate::config::{DatabaseConfig, StorageBackend};
use crate::models::{Case, CaseFilter, Client, NewCase, NewClient};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (connection, I/O, query failure).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the embedded migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique email or case number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create and list operations for clients.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Store a new client and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create_client(&self, client: NewClient) -> Result<Client, RepositoryError>;

    /// All clients in insertion order.
    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Look up a single client.
    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Number of stored clients.
    async fn count_clients(&self) -> Result<i64, RepositoryError>;
}

/// Create and list operations for cases.
#[async_trait]
pub trait CaseRegistry: Send + Sync {
    /// Store a new case and return it with its assigned id.
    ///
    /// The referenced client is not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the case number already exists.
    async fn create_case(&self, case: NewCase) -> Result<Case, RepositoryError>;

    /// Cases passing `filter`, in insertion order.
    async fn list_cases(&self, filter: CaseFilter) -> Result<Vec<Case>, RepositoryError>;

    /// Look up a single case.
    async fn get_case(&self, id: CaseId) -> Result<Option<Case>, RepositoryError>;

    /// Number of cases passing `filter`.
    async fn count_cases(&self, filter: CaseFilter) -> Result<i64, RepositoryError>;
}

/// A storage backend serving both registries.
#[async_trait]
pub trait Store: ClientRegistry + CaseRegistry {
    /// Short backend label (`"sqlite"` or `"memory"`).
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Open the store selected by `config`.
///
/// For SQLite this connects the pool and, when `auto_migrate` is set, applies
/// the embedded migrations.
///
/// # Errors
///
/// Returns `RepositoryError` if the connection or the migrations fail.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, RepositoryError> {
    match &config.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite { url } => {
            let store = SqliteStore::connect(url, config.max_connections, config.acquire_timeout)
                .await?;
            if config.auto_migrate {
                store.migrate().await?;
            }
            Ok(Arc::new(store))
        }
    }
}
