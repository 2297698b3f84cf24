//! Posting-cost catalog routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::{extractors::AdminUser, AppState};
use hireboard_db::repositories::catalog::CatalogRepository;

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/catalog/posting-options", get(list_posting_options))
}

/// GET `/catalog/posting-options` - List the publish options effective today.
///
/// One option per product code, the cheapest in credits, ordered by code.
async fn list_posting_options(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();

    match repo.posting_cost_options(today).await {
        Ok(options) => (StatusCode::OK, Json(json!({ "options": options }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list posting options");
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
