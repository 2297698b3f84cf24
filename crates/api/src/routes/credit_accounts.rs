//! Credit account and ledger read routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{extractors::AdminUser, AppState};
use hireboard_core::credit::CreditError;
use hireboard_db::repositories::credit::{CreditRepository, CreditStoreError};

/// Creates the credit account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/credit-accounts/{id}", get(get_account))
        .route("/credit-accounts/{id}/ledger", get(list_ledger))
}

/// GET `/credit-accounts/{id}` - Fetch an account with its balances.
async fn get_account(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CreditRepository::new((*state.db).clone());

    match repo.get_account(id).await {
        Ok(account) => {
            let available = account.credit_balance - account.credit_locked;
            (
                StatusCode::OK,
                Json(json!({
                    "id": account.id,
                    "recruiter_id": account.recruiter_id,
                    "status": account.status,
                    "credit_balance": account.credit_balance,
                    "credit_locked": account.credit_locked,
                    "credit_available": available,
                    "last_trx_date": account.last_trx_date.map(|d| d.to_rfc3339()),
                })),
            )
                .into_response()
        }
        Err(e) => map_credit_error(&e),
    }
}

/// GET `/credit-accounts/{id}/ledger` - List the account's ledger, newest first.
async fn list_ledger(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CreditRepository::new((*state.db).clone());

    // A ledger read against an unknown account is a 404, not an empty list.
    if let Err(e) = repo.get_account(id).await {
        return map_credit_error(&e);
    }

    match repo.list_ledger(id).await {
        Ok(entries) => {
            let items: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "trx_type": t.trx_type,
                        "trx_date": t.trx_date.to_rfc3339(),
                        "total_credit": t.total_credit,
                        "total_credit_available": t.total_credit_available,
                        "job_id": t.job_id,
                        "product_id": t.product_id,
                        "product_price_id": t.product_price_id,
                        "document_number": t.document_number,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "entries": items }))).into_response()
        }
        Err(e) => map_credit_error(&e),
    }
}

/// Maps credit store errors to HTTP responses.
fn map_credit_error(e: &CreditStoreError) -> axum::response::Response {
    match e {
        CreditStoreError::Credit(CreditError::AccountNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": format!("Credit account not found: {id}")
            })),
        )
            .into_response(),
        CreditStoreError::Credit(c) => {
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
        CreditStoreError::Database(db) => {
            error!(error = %db, "database error during credit read");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_account_maps_to_404() {
        let err = CreditStoreError::Credit(CreditError::AccountNotFound(Uuid::nil()));
        assert_eq!(map_credit_error(&err).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_inactive_account_maps_to_422() {
        let err = CreditStoreError::Credit(CreditError::AccountInactive(Uuid::nil()));
        assert_eq!(
            map_credit_error(&err).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
