//! Case registry handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use avukat_ajanda_core::CaseId;

use crate::{
    db::CaseRegistry,
    error::{AppError, Result},
    models::{Case, CaseFilter},
    state::AppState,
    validation::{CaseListQuery, CreateCaseRequest},
};

/// Build the cases router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cases", get(list_cases).post(create_case))
        .route("/api/cases/{id}", get(get_case))
}

/// List cases in id order, optionally narrowed by `?status=`.
///
/// # Errors
///
/// Returns 422 for an unknown status and an error if storage fails.
#[instrument(skip_all)]
pub async fn list_cases(
    State(state): State<AppState>,
    Query(query): Query<CaseListQuery>,
) -> Result<Json<Vec<Case>>> {
    let filter = CaseFilter {
        status: query.status()?,
        ..CaseFilter::default()
    };
    Ok(Json(state.store().list_cases(filter).await?))
}

/// Open a case.
///
/// The referenced client is not required to exist.
///
/// # Errors
///
/// Returns 422 for missing or malformed fields and 409 if the case number is
/// already taken.
#[instrument(skip_all)]
pub async fn create_case(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCaseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Case>)> {
    let Json(request) = payload?;
    let case = state.store().create_case(request.validate()?).await?;

    tracing::info!(
        case_id = %case.id,
        client_id = %case.client_id,
        status = %case.status,
        "Case created"
    );
    Ok((StatusCode::CREATED, Json(case)))
}

/// Fetch one case.
///
/// # Errors
///
/// Returns 404 if no case has this id.
#[instrument(skip_all)]
pub async fn get_case(
    State(state): State<AppState>,
    id: std::result::Result<Path<CaseId>, PathRejection>,
) -> Result<Json<Case>> {
    let Path(id) = id?;
    state
        .store()
        .get_case(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Case {id}")))
}
