//! In-memory store.
//!
//! Holds both tables behind one async lock for the lifetime of the process.
//! Uniqueness checks and id assignment happen under the same write guard, so
//! two concurrent creates with the same email cannot both succeed.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use avukat_ajanda_core::{CaseId, ClientId};

use super::{CaseRegistry, ClientRegistry, RepositoryError, Store};
use crate::models::{Case, CaseFilter, Client, NewCase, NewClient};

/// Store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    clients: Vec<Client>,
    cases: Vec<Case>,
    last_client_id: i64,
    last_case_id: i64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[async_trait]
impl ClientRegistry for MemoryStore {
    async fn create_client(&self, client: NewClient) -> Result<Client, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.clients.iter().any(|c| c.email == client.email) {
            return Err(RepositoryError::Conflict(
                "a client with this email already exists".to_owned(),
            ));
        }

        tables.last_client_id += 1;
        let client = client.into_client(ClientId::new(tables.last_client_id), Utc::now());
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        Ok(self.tables.read().await.clients.clone())
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn count_clients(&self) -> Result<i64, RepositoryError> {
        Ok(count(self.tables.read().await.clients.len()))
    }
}

#[async_trait]
impl CaseRegistry for MemoryStore {
    async fn create_case(&self, case: NewCase) -> Result<Case, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.cases.iter().any(|c| c.case_no == case.case_no) {
            return Err(RepositoryError::Conflict(
                "a case with this case number already exists".to_owned(),
            ));
        }

        tables.last_case_id += 1;
        let case = case.into_case(CaseId::new(tables.last_case_id), Utc::now());
        tables.cases.push(case.clone());
        Ok(case)
    }

    async fn list_cases(&self, filter: CaseFilter) -> Result<Vec<Case>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cases
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn get_case(&self, id: CaseId) -> Result<Option<Case>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.cases.iter().find(|c| c.id == id).cloned())
    }

    async fn count_cases(&self, filter: CaseFilter) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(count(tables.cases.iter().filter(|c| filter.matches(c)).count()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
