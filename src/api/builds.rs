//! Build completion endpoints

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::SharedState;
use crate::build::{BuildRecord, BuildResult};
use crate::secret::{SecretToken, resolve_token};

/// Sent by the build system once a build has finished
#[derive(Debug, Deserialize)]
pub struct BuildCompletion {
    pub build_url: String,
    pub result: BuildResult,
    /// Falls back to the configured default token when absent or blank.
    pub token: Option<SecretToken>,
    #[serde(default)]
    pub website: String,
    /// Falls back to the configured default.
    pub only_on_success: Option<bool>,
}

/// POST /builds - notify ZeroBug for a finished build and keep the record
pub async fn complete_build(
    AxumState(state): AxumState<SharedState>,
    Json(completion): Json<BuildCompletion>,
) -> impl IntoResponse {
    let mut build = BuildRecord::new(completion.build_url, completion.result);
    let token = resolve_token(
        completion.token,
        state.config.credentials.default_token.as_ref(),
    );
    let only_on_success = completion
        .only_on_success
        .unwrap_or(state.config.notify.only_on_success);

    info!("Build {} finished with {:?}", build.build_url, build.result);
    let status = match state
        .notifier
        .notify_build(&mut build, token, &completion.website, only_on_success)
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };

    state.build_store.lock().await.insert(build.clone());
    (status, Json(build))
}

/// GET /builds/{id} - a stored build record
pub async fn get_build(
    AxumState(state): AxumState<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.build_store.lock().await;
    match store.get(&id) {
        Some(build) => Json(build.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Build not found"})),
        )
            .into_response(),
    }
}
