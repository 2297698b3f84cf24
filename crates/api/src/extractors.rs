//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Header carrying the acting administrator's id.
///
/// Authentication itself happens upstream (gateway); the backend trusts this
/// header for audit attribution only.
pub const ADMIN_ID_HEADER: &str = "x-admin-id";

/// Extractor for the acting administrator.
///
/// Use this in handlers that need to record who performed a change:
///
/// ```ignore
/// async fn handler(admin: AdminUser) -> impl IntoResponse {
///     let user_id = admin.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub Uuid);

impl AdminUser {
    /// Returns the administrator's id.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ADMIN_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        let Some(raw) = header else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "missing_admin_id",
                    "message": format!("{ADMIN_ID_HEADER} header is required")
                })),
            ));
        };

        Uuid::parse_str(raw).map(AdminUser).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_admin_id",
                    "message": format!("{ADMIN_ID_HEADER} header must be a UUID")
                })),
            )
        })
    }
}
