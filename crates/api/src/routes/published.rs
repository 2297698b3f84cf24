//! Public listing projection routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tracing::error;

use crate::AppState;
use hireboard_db::repositories::job::JobRepository;

/// Creates the published-jobs routes.
///
/// No admin header required: this is the read model the public site consumes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/published-jobs", get(list_published))
}

/// GET `/published-jobs` - List live snapshots, highest weight first.
async fn list_published(State(state): State<AppState>) -> impl IntoResponse {
    let repo = JobRepository::new((*state.db).clone());

    match repo.list_published().await {
        Ok(snapshots) => {
            let items: Vec<serde_json::Value> = snapshots
                .into_iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "job_id": s.job_id,
                        "title": s.title,
                        "employer_name": s.employer_name,
                        "location": s.location,
                        "publish_start": s.publish_start,
                        "publish_end": s.publish_end,
                        "weight": s.weight,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "jobs": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list published jobs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
