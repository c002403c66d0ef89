//! Banner and status endpoints

use axum::{Json, extract::State as AxumState};
use serde::Serialize;

use crate::SharedState;
use crate::build::BuildRecord;

const RECENT_BUILDS: usize = 10;

#[derive(Debug, Serialize)]
pub struct ServerStats {
    pub name: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub request_url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub server: ServerStats,
    pub stored_builds: usize,
    pub recent: Vec<BuildRecord>,
}

pub async fn root() -> &'static str {
    "ZeroBug notifier"
}

/// GET /status - server info and the most recent builds
pub async fn status(AxumState(state): AxumState<SharedState>) -> Json<StatusResponse> {
    let (stored_builds, recent) = {
        let store = state.build_store.lock().await;
        (store.len(), store.recent(RECENT_BUILDS))
    };

    Json(StatusResponse {
        server: ServerStats {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            started_at: state.started_at.to_rfc3339(),
            request_url: state.client.request_url().to_string(),
        },
        stored_builds,
        recent,
    })
}
