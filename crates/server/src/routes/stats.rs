//! Dashboard counters.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::{error::Result, services::DashboardStats, state::AppState};

/// Build the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(dashboard_stats))
}

/// Totals across the whole registry.
///
/// # Errors
///
/// Returns an error if storage fails.
#[instrument(skip_all)]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(DashboardStats::collect(state.store()).await?))
}
