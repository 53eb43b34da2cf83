//! Calendar feed.

use axum::{Json, Router, routing::get};
use serde_json::Value;

use crate::state::AppState;

/// Build the calendar router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar", get(calendar))
}

/// Calendar entries. Hearings are not tracked yet, so this is always empty.
pub async fn calendar() -> Json<Vec<Value>> {
    Json(Vec::new())
}
