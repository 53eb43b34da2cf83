//! Dashboard statistics.
//!
//! Counts are computed on demand from the registries; nothing is cached.

use serde::Serialize;

use avukat_ajanda_core::{CaseStatus, ClientId};

use crate::db::{CaseRegistry, ClientRegistry, RepositoryError, Store};
use crate::models::CaseFilter;

/// Pending invoice count shown on the dashboard.
///
/// Placeholder: there is no invoicing model yet, so this is a fixed value and
/// not derived from stored data.
pub const PENDING_INVOICES_PLACEHOLDER: i64 = 3;

/// Practice-wide totals for `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_cases: i64,
    pub active_cases: i64,
    pub total_clients: i64,
    pub pending_invoices: i64,
}

impl DashboardStats {
    /// Count clients and cases across the whole store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any count fails.
    pub async fn collect(store: &dyn Store) -> Result<Self, RepositoryError> {
        Ok(Self {
            total_cases: store.count_cases(CaseFilter::default()).await?,
            active_cases: store
                .count_cases(CaseFilter::with_status(CaseStatus::Active))
                .await?,
            total_clients: store.count_clients().await?,
            pending_invoices: PENDING_INVOICES_PLACEHOLDER,
        })
    }
}

/// Case totals for one client, for `GET /api/clients/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCaseStats {
    pub client_id: ClientId,
    pub total_cases: i64,
    pub active_cases: i64,
}

impl ClientCaseStats {
    /// Count the cases filed for `client_id`.
    ///
    /// Returns `None` when no such client exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a lookup or count fails.
    pub async fn collect(
        store: &dyn Store,
        client_id: ClientId,
    ) -> Result<Option<Self>, RepositoryError> {
        if store.get_client(client_id).await?.is_none() {
            return Ok(None);
        }

        let all = CaseFilter::for_client(client_id);
        let active = CaseFilter {
            status: Some(CaseStatus::Active),
            ..all
        };

        Ok(Some(Self {
            client_id,
            total_cases: store.count_cases(all).await?,
            active_cases: store.count_cases(active).await?,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use avukat_ajanda_core::Email;

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{NewCase, NewClient};

    async fn add_client(store: &MemoryStore, email: &str) -> ClientId {
        store
            .create_client(NewClient {
                name: "Müvekkil".to_owned(),
                email: Email::parse(email).unwrap(),
                phone: "0555".to_owned(),
            })
            .await
            .unwrap()
            .id
    }

    async fn add_case(store: &MemoryStore, case_no: &str, client_id: ClientId, status: CaseStatus) {
        store
            .create_case(NewCase {
                case_no: case_no.to_owned(),
                title: "Dava".to_owned(),
                client_id,
                status,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let store = MemoryStore::new();
        let first = add_client(&store, "a@example.com").await;
        let second = add_client(&store, "b@example.com").await;
        add_case(&store, "1", first, CaseStatus::Active).await;
        add_case(&store, "2", first, CaseStatus::Closed).await;
        add_case(&store, "3", second, CaseStatus::Active).await;

        let stats = DashboardStats::collect(&store).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_cases: 3,
                active_cases: 2,
                total_clients: 2,
                pending_invoices: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_store_still_reports_placeholder() {
        let stats = DashboardStats::collect(&MemoryStore::new()).await.unwrap();
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.pending_invoices, PENDING_INVOICES_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_client_case_stats() {
        let store = MemoryStore::new();
        let client = add_client(&store, "a@example.com").await;
        add_case(&store, "1", client, CaseStatus::Active).await;
        add_case(&store, "2", client, CaseStatus::Pending).await;
        add_case(&store, "3", ClientId::new(99), CaseStatus::Active).await;

        let stats = ClientCaseStats::collect(&store, client).await.unwrap().unwrap();
        assert_eq!(stats.total_cases, 2);
        assert_eq!(stats.active_cases, 1);

        let missing = ClientCaseStats::collect(&store, ClientId::new(99)).await.unwrap();
        assert!(missing.is_none());
    }
}
