//! Posting workflow routes for admin and offline jobs.
//!
//! Both wrapper flavors share the handlers; the routers differ only in the
//! path prefix, the `JobKind` baked into each wrapper, and the extra fields
//! an offline post carries (recruiter, price option).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{extractors::AdminUser, AppState};
use hireboard_core::job::JobKind;
use hireboard_db::repositories::{
    credit::CreditStoreError,
    job::{
        CreateAdminJobInput, CreateOfflineJobInput, EditJobInput, JobContentInput, JobDetails,
        JobError, JobRepository,
    },
};

/// Creates the admin-job routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin-jobs", post(create_admin_job))
        .route("/admin-jobs", get(list_admin_jobs))
        .route("/admin-jobs/{id}", get(get_admin_job))
        .route("/admin-jobs/{id}", put(edit_admin_job))
        .route("/admin-jobs/{id}", delete(delete_admin_job))
        .route("/admin-jobs/{id}/publish", post(publish_admin_job))
        .route("/admin-jobs/{id}/unpublish", post(unpublish_admin_job))
        .route("/admin-jobs/{id}/republish", post(republish_admin_job))
}

/// Creates the offline-job routes.
pub fn offline_routes() -> Router<AppState> {
    Router::new()
        .route("/offline-jobs", post(create_offline_job))
        .route("/offline-jobs", get(list_offline_jobs))
        .route("/offline-jobs/{id}", get(get_offline_job))
        .route("/offline-jobs/{id}", put(edit_offline_job))
        .route("/offline-jobs/{id}", delete(delete_offline_job))
        .route("/offline-jobs/{id}/publish", post(publish_offline_job))
        .route("/offline-jobs/{id}/unpublish", post(unpublish_offline_job))
        .route("/offline-jobs/{id}/republish", post(republish_offline_job))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Content fields shared by create and edit requests.
#[derive(Debug, Deserialize, Validate)]
pub struct JobContentRequest {
    /// Post title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Short description shown in listings.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Work location.
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// Employer display name.
    #[validate(length(min = 1, max = 200))]
    pub employer_name: String,
    /// Full post body.
    #[validate(length(min = 1))]
    pub content: String,
    /// First day the post should be live.
    pub publish_start: NaiveDate,
    /// Last day the post should be live.
    pub publish_end: NaiveDate,
}

impl JobContentRequest {
    fn into_input(self) -> JobContentInput {
        JobContentInput {
            title: self.title,
            description: self.description,
            location: self.location,
            employer_name: self.employer_name,
            content: self.content,
            publish_start: self.publish_start,
            publish_end: self.publish_end,
        }
    }
}

/// Request body for creating an admin post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminJobRequest {
    /// Content fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub content: JobContentRequest,
}

/// Request body for creating an offline (recruiter) post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOfflineJobRequest {
    /// Content fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub content: JobContentRequest,
    /// Recruiter the post belongs to.
    pub recruiter_id: Uuid,
    /// Chosen publish-cost option.
    pub product_price_id: Uuid,
}

/// Request body for editing a post.
#[derive(Debug, Deserialize, Validate)]
pub struct EditJobRequest {
    /// Replacement content fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub content: JobContentRequest,
    /// New price option (offline posts only).
    pub product_price_id: Option<Uuid>,
}

fn job_response(details: &JobDetails) -> serde_json::Value {
    json!({
        "id": details.wrapper_id,
        "job_id": details.job.id,
        "kind": details.kind,
        "status": details.state.status,
        "publish_ind": details.state.publish_ind,
        "title": details.job.title,
        "description": details.job.description,
        "location": details.job.location,
        "employer_name": details.job.employer_name,
        "content": details.job.content,
        "publish_start": details.job.publish_start,
        "publish_end": details.job.publish_end,
        "recruiter_id": details.recruiter_id,
        "product_price_id": details.product_price_id,
        "credit_trx_id": details.credit_trx_id,
        "last_publish_date": details.last_publish_date.map(|d| d.to_rfc3339()),
        "created_at": details.job.created_at.to_rfc3339(),
        "updated_at": details.job.updated_at.to_rfc3339(),
    })
}

fn validation_response(errors: &validator::ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_error",
            "message": errors.to_string()
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/admin-jobs` - Create an admin post in (Pending, New).
async fn create_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<CreateAdminJobRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let repo = JobRepository::new((*state.db).clone());
    let input = CreateAdminJobInput {
        content: payload.content.into_input(),
        created_by: admin.user_id(),
    };

    match repo.create_admin_job(input).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({ "id": created.wrapper_id, "job_id": created.job_id })),
        )
            .into_response(),
        Err(e) => map_job_error(&e),
    }
}

/// POST `/offline-jobs` - Create a recruiter post in (Pending, New).
async fn create_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<CreateOfflineJobRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let repo = JobRepository::new((*state.db).clone());
    let input = CreateOfflineJobInput {
        content: payload.content.into_input(),
        recruiter_id: payload.recruiter_id,
        product_price_id: payload.product_price_id,
        created_by: admin.user_id(),
    };

    match repo.create_offline_job(input).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({ "id": created.wrapper_id, "job_id": created.job_id })),
        )
            .into_response(),
        Err(e) => map_job_error(&e),
    }
}

async fn list_jobs(state: &AppState, kind: JobKind) -> axum::response::Response {
    let repo = JobRepository::new((*state.db).clone());
    match repo.list_jobs(kind).await {
        Ok(jobs) => {
            let items: Vec<serde_json::Value> = jobs.iter().map(job_response).collect();
            (StatusCode::OK, Json(json!({ "jobs": items }))).into_response()
        }
        Err(e) => map_job_error(&e),
    }
}

/// GET `/admin-jobs` - List non-deleted admin posts.
async fn list_admin_jobs(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    list_jobs(&state, JobKind::Admin).await
}

/// GET `/offline-jobs` - List non-deleted offline posts.
async fn list_offline_jobs(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    list_jobs(&state, JobKind::Offline).await
}

async fn get_job(state: &AppState, kind: JobKind, id: Uuid) -> axum::response::Response {
    let repo = JobRepository::new((*state.db).clone());
    match repo.get_job(kind, id).await {
        Ok(details) => (StatusCode::OK, Json(job_response(&details))).into_response(),
        Err(e) => map_job_error(&e),
    }
}

/// GET `/admin-jobs/{id}` - Fetch one admin post.
async fn get_admin_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    get_job(&state, JobKind::Admin, id).await
}

/// GET `/offline-jobs/{id}` - Fetch one offline post.
async fn get_offline_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    get_job(&state, JobKind::Offline, id).await
}

async fn edit_job(
    state: &AppState,
    kind: JobKind,
    id: Uuid,
    admin: AdminUser,
    payload: EditJobRequest,
) -> axum::response::Response {
    if let Err(errors) = payload.validate() {
        return validation_response(&errors);
    }

    let repo = JobRepository::new((*state.db).clone());
    let input = EditJobInput {
        content: payload.content.into_input(),
        product_price_id: payload.product_price_id,
        updated_by: admin.user_id(),
    };

    match repo.edit_job(kind, id, input).await {
        Ok(()) => match repo.get_job(kind, id).await {
            Ok(details) => (StatusCode::OK, Json(job_response(&details))).into_response(),
            Err(e) => map_job_error(&e),
        },
        Err(e) => map_job_error(&e),
    }
}

/// PUT `/admin-jobs/{id}` - Edit an admin post.
async fn edit_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditJobRequest>,
) -> impl IntoResponse {
    edit_job(&state, JobKind::Admin, id, admin, payload).await
}

/// PUT `/offline-jobs/{id}` - Edit an offline post.
async fn edit_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditJobRequest>,
) -> impl IntoResponse {
    edit_job(&state, JobKind::Offline, id, admin, payload).await
}

/// The lifecycle transitions that take no request body.
#[derive(Debug, Clone, Copy)]
enum Transition {
    Publish,
    Unpublish,
    Republish,
}

async fn run_transition(
    state: &AppState,
    kind: JobKind,
    id: Uuid,
    admin: AdminUser,
    transition: Transition,
) -> axum::response::Response {
    let repo = JobRepository::new((*state.db).clone());
    let user_id = admin.user_id();

    let result = match transition {
        Transition::Publish => repo.publish_job(kind, id, user_id).await,
        Transition::Unpublish => repo.unpublish_job(kind, id, user_id).await,
        Transition::Republish => repo.republish_job(kind, id, user_id).await,
    };

    match result {
        Ok(()) => {
            info!(wrapper_id = %id, kind = ?kind, transition = ?transition, "transition applied");
            match repo.get_job(kind, id).await {
                Ok(details) => (StatusCode::OK, Json(job_response(&details))).into_response(),
                Err(e) => map_job_error(&e),
            }
        }
        Err(e) => map_job_error(&e),
    }
}

/// POST `/admin-jobs/{id}/publish` - Publish an admin post.
async fn publish_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Admin, id, admin, Transition::Publish).await
}

/// POST `/offline-jobs/{id}/publish` - Publish an offline post, charging credit.
async fn publish_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Offline, id, admin, Transition::Publish).await
}

/// POST `/admin-jobs/{id}/unpublish` - Take an admin post down.
async fn unpublish_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Admin, id, admin, Transition::Unpublish).await
}

/// POST `/offline-jobs/{id}/unpublish` - Take an offline post down.
async fn unpublish_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Offline, id, admin, Transition::Unpublish).await
}

/// POST `/admin-jobs/{id}/republish` - Put an admin post live again.
async fn republish_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Admin, id, admin, Transition::Republish).await
}

/// POST `/offline-jobs/{id}/republish` - Put an offline post live again (no charge).
async fn republish_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    run_transition(&state, JobKind::Offline, id, admin, Transition::Republish).await
}

async fn delete_job_inner(
    state: &AppState,
    kind: JobKind,
    id: Uuid,
    admin: AdminUser,
) -> axum::response::Response {
    let repo = JobRepository::new((*state.db).clone());
    match repo.delete_job(kind, id, admin.user_id()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_job_error(&e),
    }
}

/// DELETE `/admin-jobs/{id}` - Soft-delete a pending admin post.
async fn delete_admin_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    delete_job_inner(&state, JobKind::Admin, id, admin).await
}

/// DELETE `/offline-jobs/{id}` - Soft-delete a pending offline post.
async fn delete_offline_job(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    delete_job_inner(&state, JobKind::Offline, id, admin).await
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps posting errors to HTTP responses.
fn map_job_error(e: &JobError) -> axum::response::Response {
    match e {
        JobError::WrapperNotFound(..) | JobError::JobNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        JobError::PriceNotFound(id) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "price_not_found",
                "message": format!("Product price not found: {id}")
            })),
        )
            .into_response(),
        JobError::AccountNotFoundForRecruiter(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": format!("No credit account for recruiter: {id}")
            })),
        )
            .into_response(),
        JobError::MissingPublishedSnapshot(job_id) => {
            error!(job_id = %job_id, "unpublish found no live snapshot for a paid post");
            (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "missing_published_snapshot",
                    "message": e.to_string()
                })),
            )
                .into_response()
        }
        JobError::Workflow(w) => {
            warn!(error = %w, "workflow transition rejected");
            let status = StatusCode::from_u16(w.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({
                    "error": w.error_code(),
                    "message": w.to_string()
                })),
            )
                .into_response()
        }
        JobError::Credit(CreditStoreError::Credit(c)) => {
            // Insufficient balance is an expected outcome; corruption is not.
            if c.is_invariant_violation() {
                error!(error = %c, "credit ledger invariant violated");
            } else {
                info!(error = %c, "credit deduction declined");
            }
            let status = StatusCode::from_u16(c.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({
                    "error": c.error_code(),
                    "message": c.to_string()
                })),
            )
                .into_response()
        }
        JobError::Credit(CreditStoreError::Database(db)) => {
            error!(error = %db, "database error during posting operation");
            internal_error()
        }
        JobError::Database(db) => {
            error!(error = %db, "database error during posting operation");
            internal_error()
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireboard_core::credit::CreditError;
    use rust_decimal::Decimal;

    #[test]
    fn test_insufficient_credit_maps_to_422() {
        let err = JobError::Credit(CreditStoreError::Credit(CreditError::InsufficientBalance {
            requested: Decimal::ONE_HUNDRED,
            available: Decimal::TEN,
        }));
        let response = map_job_error(&err);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = JobError::JobNotFound(Uuid::nil());
        assert_eq!(map_job_error(&err).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_snapshot_maps_to_409() {
        let err = JobError::MissingPublishedSnapshot(Uuid::nil());
        assert_eq!(map_job_error(&err).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invariant_violation_maps_to_500() {
        let err = JobError::Credit(CreditStoreError::Credit(CreditError::NoAvailableCredit(
            Uuid::nil(),
        )));
        assert_eq!(
            map_job_error(&err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
