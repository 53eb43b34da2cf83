//! Client domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use avukat_ajanda_core::{ClientId, Email};

/// A registered client of the practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    /// System-assigned id, never reused.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Normalised email, unique across clients.
    pub email: Email,
    /// Phone number, free-form.
    pub phone: String,
    /// When the client was registered.
    pub created_at: DateTime<Utc>,
}

/// A validated client waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: Email,
    pub phone: String,
}

impl NewClient {
    /// Attach the storage-assigned id and creation time.
    #[must_use]
    pub fn into_client(self, id: ClientId, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }
}
