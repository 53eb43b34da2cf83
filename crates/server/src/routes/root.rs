//! Service banner, health probes and version info.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

const SERVICE_NAME: &str = "AvukatAjanda API";

/// Build the root router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/version", get(version))
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub status: &'static str,
    pub database: &'static str,
}

/// Service banner.
///
/// Always answers 200; `database` reports whether storage answered a ping.
pub async fn index(State(state): State<AppState>) -> Json<Banner> {
    let database = match state.store().ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Storage ping failed");
            "disconnected"
        }
    };

    Json(Banner {
        message: SERVICE_NAME,
        status: "active",
        database,
    })
}

/// Liveness check. Does not touch storage.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// Readiness check.
///
/// Returns 503 Service Unavailable if the store does not answer a ping.
pub async fn readiness(State(state): State<AppState>) -> Response {
    let store = state.store();
    match store.ping().await {
        Ok(()) => Json(json!({ "status": "ready", "database": store.backend() })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, backend = store.backend(), "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "database": store.backend() })),
            )
                .into_response()
        }
    }
}

/// Body of `GET /api/version`.
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub environment: String,
}

/// Build version and deployment environment.
pub async fn version(State(state): State<AppState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config().environment.clone(),
    })
}
