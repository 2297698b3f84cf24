//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod catalog;
pub mod credit_accounts;
pub mod health;
pub mod jobs;
pub mod published;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalog::routes())
        .merge(credit_accounts::routes())
        .merge(jobs::admin_routes())
        .merge(jobs::offline_routes())
        .merge(published::routes())
}
