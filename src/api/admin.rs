//! Admin-only endpoints

use axum::{
    Json,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::SharedState;
use crate::admin::{AdminCapability, list_sites, validate_connection};

pub const ADMIN_KEY_HEADER: &str = "X-ZeroBug-Admin-Key";

fn authorize(state: &SharedState, headers: &HeaderMap) -> Option<AdminCapability> {
    let presented = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok())?;
    AdminCapability::authorize(state.config.credentials.admin_key.as_ref(), presented)
}

fn forbidden() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": "Administrator access required"})),
    )
        .into_response()
}

/// GET /admin/sites - website dropdown entries
pub async fn get_sites(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(admin) = authorize(&state, &headers) else {
        return forbidden();
    };
    let sites = list_sites(&state.client, &admin).await;
    Json(json!({ "sites": sites })).into_response()
}

/// GET /admin/validate - check that ZeroBug answers with 200
pub async fn validate(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(admin) = authorize(&state, &headers) else {
        return forbidden();
    };
    Json(validate_connection(&state.client, &admin).await).into_response()
}
