//! Legal case domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use avukat_ajanda_core::{CaseId, CaseStatus, ClientId};

/// A legal case handled by the practice.
///
/// `client_id` is a soft reference: nothing checks that the client exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    /// System-assigned id, never reused.
    pub id: CaseId,
    /// Court or office case number, unique across cases.
    pub case_no: String,
    /// Short description of the case.
    pub title: String,
    /// The client this case is filed for.
    pub client_id: ClientId,
    /// Current status.
    pub status: CaseStatus,
    /// When the case was registered.
    pub created_at: DateTime<Utc>,
}

/// A validated case waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub case_no: String,
    pub title: String,
    pub client_id: ClientId,
    pub status: CaseStatus,
}

impl NewCase {
    /// Attach the storage-assigned id and creation time.
    #[must_use]
    pub fn into_case(self, id: CaseId, created_at: DateTime<Utc>) -> Case {
        Case {
            id,
            case_no: self.case_no,
            title: self.title,
            client_id: self.client_id,
            status: self.status,
            created_at,
        }
    }
}

/// Narrows case listings and counts. The default matches every case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub client_id: Option<ClientId>,
}

impl CaseFilter {
    /// Only cases with the given status.
    #[must_use]
    pub const fn with_status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            client_id: None,
        }
    }

    /// Only cases filed for the given client.
    #[must_use]
    pub const fn for_client(client_id: ClientId) -> Self {
        Self {
            status: None,
            client_id: Some(client_id),
        }
    }

    /// Whether `case` passes this filter.
    #[must_use]
    pub fn matches(&self, case: &Case) -> bool {
        self.status.is_none_or(|status| case.status == status)
            && self.client_id.is_none_or(|id| case.client_id == id)
    }
}
