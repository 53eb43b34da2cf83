//! Print dashboard counters for the configured database.

use avukat_ajanda_server::db;
use avukat_ajanda_server::services::DashboardStats;

use super::{CommandError, load_config};

/// Show the same counters as `GET /api/stats`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or storage fails.
pub async fn run() -> Result<(), CommandError> {
    let config = load_config()?;
    let store = db::open_store(&config.database).await?;

    let stats = DashboardStats::collect(store.as_ref()).await?;

    tracing::info!("AvukatAjanda Statistics");
    tracing::info!("=======================");
    tracing::info!("Total clients: {}", stats.total_clients);
    tracing::info!("Total cases: {}", stats.total_cases);
    tracing::info!("Active cases: {}", stats.active_cases);
    tracing::info!("Pending invoices: {}", stats.pending_invoices);
    Ok(())
}
