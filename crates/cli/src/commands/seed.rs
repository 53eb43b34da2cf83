//! Seed the database with demo clients and cases.
//!
//! Seeding is idempotent: records whose email or case number already exist
//! are skipped, so the command can be rerun against the same database.

use avukat_ajanda_core::{CaseStatus, ClientId, Email};
use avukat_ajanda_server::config::StorageBackend;
use avukat_ajanda_server::db::{self, CaseRegistry, ClientRegistry, RepositoryError, Store};
use avukat_ajanda_server::models::{NewCase, NewClient};

use super::{CommandError, load_config};

/// Totals from one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub clients_inserted: u32,
    pub clients_skipped: u32,
    pub cases_inserted: u32,
    pub cases_skipped: u32,
}

/// Seed the configured database.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the backend is
/// `memory://`, or storage fails for a reason other than a duplicate.
pub async fn run(clients: u32, cases_per_client: u32) -> Result<(), CommandError> {
    let config = load_config()?;
    if matches!(config.database.backend, StorageBackend::Memory) {
        return Err(CommandError::NeedsDatabase("seed"));
    }

    let store = db::open_store(&config.database).await?;
    tracing::info!(clients, cases_per_client, "Starting seeding process");

    let report = seed(store.as_ref(), clients, cases_per_client).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Clients inserted: {}", report.clients_inserted);
    tracing::info!("  Clients skipped (already exist): {}", report.clients_skipped);
    tracing::info!("  Cases inserted: {}", report.cases_inserted);
    tracing::info!("  Cases skipped (already exist): {}", report.cases_skipped);
    Ok(())
}

/// Insert `clients` clients with `cases_per_client` cases each.
///
/// Case statuses cycle through every [`CaseStatus`].
///
/// # Errors
///
/// Returns the first storage error that is not a uniqueness conflict.
pub async fn seed(
    store: &dyn Store,
    clients: u32,
    cases_per_client: u32,
) -> Result<SeedReport, CommandError> {
    let mut report = SeedReport::default();
    let existing = store.list_clients().await?;

    for n in 1..=clients {
        let email = Email::parse(&format!("client{n}@seed.avukatajanda.local"))?;
        let client_id = match store.create_client(seed_client(n, email.clone())).await {
            Ok(client) => {
                report.clients_inserted += 1;
                client.id
            }
            Err(RepositoryError::Conflict(_)) => {
                report.clients_skipped += 1;
                match existing.iter().find(|c| c.email == email) {
                    Some(client) => client.id,
                    None => continue,
                }
            }
            Err(e) => return Err(e.into()),
        };

        let statuses = CaseStatus::ALL.into_iter().cycle();
        for (m, status) in (1..=cases_per_client).zip(statuses) {
            match store.create_case(seed_case(client_id, m, status)).await {
                Ok(_) => report.cases_inserted += 1,
                Err(RepositoryError::Conflict(_)) => report.cases_skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(report)
}

fn seed_client(n: u32, email: Email) -> NewClient {
    NewClient {
        name: format!("Seed Client {n}"),
        email,
        phone: format!("+90 555 000 {n:04}"),
    }
}

fn seed_case(client_id: ClientId, m: u32, status: CaseStatus) -> NewCase {
    NewCase {
        case_no: format!("SEED-{client_id}-{m}"),
        title: format!("Seed case {m} for client {client_id}"),
        client_id,
        status,
    }
}
