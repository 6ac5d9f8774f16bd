use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and the age and size of the job catalog in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.catalog.snapshot();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillbridge-api",
        "catalog": {
            "source": catalog.source(),
            "refreshedAt": catalog.refreshed_at(),
            "postings": catalog.posting_count()
        }
    }))
}
