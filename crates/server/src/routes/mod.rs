//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Service banner with database state
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (503 if storage is down)
//! GET  /api/version               - Build version and environment
//!
//! # Clients
//! GET  /api/clients               - List clients
//! POST /api/clients               - Register a client
//! GET  /api/clients/{id}          - Client detail
//! GET  /api/clients/{id}/stats    - Case counts for one client
//!
//! # Cases
//! GET  /api/cases                 - List cases (optional ?status=)
//! POST /api/cases                 - Open a case
//! GET  /api/cases/{id}            - Case detail
//!
//! # Dashboard
//! GET  /api/stats                 - Dashboard counters
//! GET  /api/calendar              - Calendar entries
//! ```

pub mod calendar;
pub mod cases;
pub mod clients;
pub mod root;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Create the full route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .merge(clients::router())
        .merge(cases::router())
        .merge(stats::router())
        .merge(calendar::router())
}
