//! SQLite-backed store.
//!
//! Each operation borrows one pooled connection for a single statement; the
//! connection goes back to the pool when the query future completes or is
//! dropped. Uniqueness is enforced by the schema and a unique-violation from
//! the driver is reported as [`RepositoryError::Conflict`].

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};

use avukat_ajanda_core::{CaseId, CaseStatus, ClientId, Email};

use super::{CaseRegistry, ClientRegistry, RepositoryError, Store};
use crate::models::{Case, CaseFilter, Client, NewCase, NewClient};

/// Embedded migrations from `crates/server/migrations/`.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Store backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to the database at `url`, creating the file if missing.
    ///
    /// In-memory databases (`sqlite::memory:`) live only as long as their
    /// connection, so they get a single connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the URL is invalid or the
    /// connection cannot be established.
    pub async fn connect(
        url: &SecretString,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let url = url.expose_secret();
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(in_memory, "SQLite pool created");

        Ok(Self { pool })
    }

    /// Apply any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

/// Map an insert error, turning a unique violation into `Conflict`.
fn insert_error(e: sqlx::Error, conflict: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict.to_owned());
    }
    RepositoryError::Database(e)
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ClientId::new(row.id),
            name: row.name,
            email,
            phone: row.phone,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CaseRow {
    id: i64,
    case_no: String,
    title: String,
    client_id: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CaseRow> for Case {
    type Error = RepositoryError;

    fn try_from(row: CaseRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<CaseStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: CaseId::new(row.id),
            case_no: row.case_no,
            title: row.title,
            client_id: ClientId::new(row.client_id),
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ClientRegistry for SqliteStore {
    async fn create_client(&self, client: NewClient) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            INSERT INTO clients (name, email, phone, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, phone, created_at
            ",
        )
        .bind(&client.name)
        .bind(client.email.as_str())
        .bind(&client.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, "a client with this email already exists"))?;

        row.try_into()
    }

    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClientRow>(
            "SELECT id, name, email, phone, created_at FROM clients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT id, name, email, phone, created_at FROM clients WHERE id = ?1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn count_clients(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CaseRegistry for SqliteStore {
    async fn create_case(&self, case: NewCase) -> Result<Case, RepositoryError> {
        let row = sqlx::query_as::<_, CaseRow>(
            r"
            INSERT INTO cases (case_no, title, client_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, case_no, title, client_id, status, created_at
            ",
        )
        .bind(&case.case_no)
        .bind(&case.title)
        .bind(case.client_id.as_i64())
        .bind(case.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, "a case with this case number already exists"))?;

        row.try_into()
    }

    async fn list_cases(&self, filter: CaseFilter) -> Result<Vec<Case>, RepositoryError> {
        let rows = sqlx::query_as::<_, CaseRow>(
            r"
            SELECT id, case_no, title, client_id, status, created_at
            FROM cases
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR client_id = ?2)
            ORDER BY id
            ",
        )
        .bind(filter.status.map(CaseStatus::as_str))
        .bind(filter.client_id.map(|id| id.as_i64()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Case::try_from).collect()
    }

    async fn get_case(&self, id: CaseId) -> Result<Option<Case>, RepositoryError> {
        let row = sqlx::query_as::<_, CaseRow>(
            r"
            SELECT id, case_no, title, client_id, status, created_at
            FROM cases
            WHERE id = ?1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Case::try_from).transpose()
    }

    async fn count_cases(&self, filter: CaseFilter) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM cases
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR client_id = ?2)
            ",
        )
        .bind(filter.status.map(CaseStatus::as_str))
        .bind(filter.client_id.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
