//! Client registry handlers.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use avukat_ajanda_core::ClientId;

use crate::{
    db::ClientRegistry,
    error::{AppError, Result},
    models::Client,
    services::ClientCaseStats,
    state::AppState,
    validation::CreateClientRequest,
};

/// Build the clients router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/{id}", get(get_client))
        .route("/api/clients/{id}/stats", get(client_stats))
}

/// List every client in id order.
///
/// # Errors
///
/// Returns an error if storage fails.
#[instrument(skip_all)]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>> {
    Ok(Json(state.store().list_clients().await?))
}

/// Register a client.
///
/// # Errors
///
/// Returns 422 for missing or malformed fields and 409 if the email is
/// already registered.
#[instrument(skip_all)]
pub async fn create_client(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>)> {
    let Json(request) = payload?;
    let client = state.store().create_client(request.validate()?).await?;

    tracing::info!(client_id = %client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// Fetch one client.
///
/// # Errors
///
/// Returns 404 if no client has this id.
#[instrument(skip_all)]
pub async fn get_client(
    State(state): State<AppState>,
    id: std::result::Result<Path<ClientId>, PathRejection>,
) -> Result<Json<Client>> {
    let Path(id) = id?;
    state
        .store()
        .get_client(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Client {id}")))
}

/// Case counts for one client.
///
/// # Errors
///
/// Returns 404 if no client has this id.
#[instrument(skip_all)]
pub async fn client_stats(
    State(state): State<AppState>,
    id: std::result::Result<Path<ClientId>, PathRejection>,
) -> Result<Json<ClientCaseStats>> {
    let Path(id) = id?;
    ClientCaseStats::collect(state.store(), id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Client {id}")))
}
